use crate::types::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct GetCatalogDrinksResponseData {
    pub drinks: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct GetCatalogDrinksResponse {
    pub data: GetCatalogDrinksResponseData,
}

pub async fn get_catalog_drinks(State(state): State<AppState>) -> Response {
    let drinks = state
        .drink_finder
        .catalog()
        .drinks()
        .into_iter()
        .map(str::to_string)
        .collect();

    (
        StatusCode::OK,
        Json(GetCatalogDrinksResponse {
            data: GetCatalogDrinksResponseData { drinks },
        }),
    )
        .into_response()
}
