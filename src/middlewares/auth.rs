use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{types::app_state::AppState, utils::app_error::AppError};

/// Static shared-key check. Open when no key is configured.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match state.auth_key {
        Some(ref auth_key) => match headers.get("authorization") {
            Some(header) if header.as_bytes() == auth_key.as_bytes() => Ok(next.run(request).await),
            _ => {
                warn!("Rejected unauthorized request to {}", request.uri().path());
                Err(AppError::new(StatusCode::UNAUTHORIZED, "Unauthorized"))
            }
        },
        None => Ok(next.run(request).await),
    }
}
