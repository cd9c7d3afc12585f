use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::auth::models::ResolvedIdentity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Request extension carrying the caller resolved from the bearer token.
///
/// Product handlers take ownership from this and nothing else.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub ResolvedIdentity);

/// Middleware that resolves the bearer token to a live user before any handler runs
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header_value = authorization_header(&req)?.to_string();

    let identity = state
        .auth_service
        .resolve_identity(&header_value)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser(identity));

    Ok(next.run(req).await)
}

fn authorization_header(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })
}
