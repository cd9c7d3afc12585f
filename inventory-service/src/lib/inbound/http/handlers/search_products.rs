use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::product_payload::PageData;
use super::product_payload::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::PageRequest;
use crate::domain::validation::ValidationErrors;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn search_products(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(owner)): Extension<AuthenticatedUser>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<ApiSuccess<PageData<ProductData>>, ApiError> {
    let Query(params) = params?;
    let term = params
        .search
        .ok_or_else(|| ValidationErrors::single("search", "search is required"))?;

    state
        .product_service
        .search_products(&owner, &term, PageRequest::new(params.page, params.size))
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    search: Option<String>,
    page: Option<i64>,
    size: Option<i64>,
}
