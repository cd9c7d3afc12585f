use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::product_payload::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

const DEFAULT_THRESHOLD: i32 = 5;

pub async fn low_stock_products(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(owner)): Extension<AuthenticatedUser>,
    params: Result<Query<LowStockParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    let Query(params) = params?;
    let threshold = params.threshold.unwrap_or(DEFAULT_THRESHOLD);

    state
        .product_service
        .low_stock_products(&owner, threshold)
        .await
        .map_err(ApiError::from)
        .map(|products| {
            ApiSuccess::new(
                StatusCode::OK,
                products.into_iter().map(ProductData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, Deserialize)]
pub struct LowStockParams {
    threshold: Option<i32>,
}
