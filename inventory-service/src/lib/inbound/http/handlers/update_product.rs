use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::product_payload::parse_product_id;
use super::product_payload::ProductData;
use super::product_payload::ProductRequestBody;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_product(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(owner)): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
    body: Result<Json<ProductRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;
    let Json(body) = body?;
    let draft = body.try_into_draft()?;

    state
        .product_service
        .update_product(product_id, draft, &owner)
        .await
        .map_err(ApiError::from)
        .map(|product| ApiSuccess::new(StatusCode::OK, product.into()))
}
