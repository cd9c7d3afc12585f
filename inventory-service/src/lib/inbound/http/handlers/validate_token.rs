use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;

use crate::inbound::http::router::AppState;

/// Never fails: a missing, malformed, foreign or expired token is just `false`.
pub async fn validate_token(State(state): State<AppState>, headers: HeaderMap) -> Json<bool> {
    let valid = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| state.auth_service.validate_token(value))
        .unwrap_or(false);

    Json(valid)
}
