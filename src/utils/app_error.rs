use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::drink_finder::types::search_error::SearchError;

#[derive(Debug)]
pub struct AppError {
    pub code: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: StatusCode, message: &str) -> Self {
        AppError {
            code,
            message: message.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Input(e) => AppError::new(StatusCode::BAD_REQUEST, &e.to_string()),
            SearchError::Failed(_) => AppError::new(
                StatusCode::BAD_GATEWAY,
                "Failed to search for nearby stores",
            ),
            SearchError::Superseded { .. } => AppError::new(
                StatusCode::CONFLICT,
                "Search was replaced by a newer search",
            ),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponseJson {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        (
            self.code,
            Json(ErrorResponseJson {
                message: self.message,
            }),
        )
            .into_response()
    }
}
