use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::product_payload::ProductData;
use super::product_payload::ProductRequestBody;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(owner)): Extension<AuthenticatedUser>,
    body: Result<Json<ProductRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let Json(body) = body?;
    let draft = body.try_into_draft()?;

    state
        .product_service
        .create_product(draft, &owner)
        .await
        .map_err(ApiError::from)
        .map(|product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}
