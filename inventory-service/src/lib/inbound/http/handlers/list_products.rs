use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::product_payload::PageData;
use super::product_payload::PageParams;
use super::product_payload::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(owner)): Extension<AuthenticatedUser>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<ApiSuccess<PageData<ProductData>>, ApiError> {
    let Query(params) = params?;

    state
        .product_service
        .list_products(&owner, params.into())
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
