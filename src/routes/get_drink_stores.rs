use crate::{
    services::drink_finder::types::search_report::{SearchOutcome, SearchReport},
    types::{
        app_state::AppState,
        coordinate::{Coordinate, SearchRectangle},
    },
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `lat`/`lon` are optional: a client that has not resolved its location yet
/// gets a prompt back instead of a search. Their ranges are checked by the
/// pipeline.
#[derive(Validate, Deserialize)]
pub struct GetDrinkStoresPayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub drink: String,

    pub lat: Option<f64>,

    pub lon: Option<f64>,

    #[validate(length(min = 1, max = 128, message = "Must be 1 to 128 characters"))]
    pub session: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GetDrinkStoresStatus {
    Matched,
    NoPlacesNearby,
    NoneSellDrink,
}

#[derive(Serialize, Deserialize)]
pub struct GetDrinkStoresResponseDataStore {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub maps_url: String,
}

#[derive(Serialize, Deserialize)]
pub struct GetDrinkStoresResponseData {
    pub status: GetDrinkStoresStatus,
    pub provider_returned_zero: bool,
    pub places_nearby: usize,
    pub catalog_matches: Vec<String>,
    pub rectangle: SearchRectangle,
    pub stores: Vec<GetDrinkStoresResponseDataStore>,
}

#[derive(Serialize, Deserialize)]
pub struct GetDrinkStoresResponse {
    pub data: GetDrinkStoresResponseData,
}

impl From<SearchReport> for GetDrinkStoresResponseData {
    fn from(report: SearchReport) -> Self {
        let provider_returned_zero = report.provider_returned_zero();
        let (status, stores) = match report.outcome {
            SearchOutcome::Matched(stores) => (GetDrinkStoresStatus::Matched, stores),
            SearchOutcome::NoPlacesNearby => (GetDrinkStoresStatus::NoPlacesNearby, vec![]),
            SearchOutcome::NoneSellDrink => (GetDrinkStoresStatus::NoneSellDrink, vec![]),
        };

        GetDrinkStoresResponseData {
            status,
            provider_returned_zero,
            places_nearby: report.places_nearby,
            catalog_matches: report.catalog_matches,
            rectangle: report.rectangle,
            stores: stores
                .into_iter()
                .map(|s| {
                    let maps_url = s.maps_url();
                    GetDrinkStoresResponseDataStore {
                        id: s.place.id,
                        name: s.place.display_name.text,
                        address: s.place.formatted_address,
                        latitude: s.place.location.latitude,
                        longitude: s.place.location.longitude,
                        maps_url,
                    }
                })
                .collect(),
        }
    }
}

#[cfg_attr(test, debug_handler)]
pub async fn get_drink_stores(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<GetDrinkStoresPayload>,
) -> Result<Response, AppError> {
    let coordinate = match (payload.lat, payload.lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        _ => None,
    };

    let report = state
        .drink_finder
        .run_session_search(payload.session.as_deref(), &payload.drink, coordinate)
        .await?;

    Ok((
        StatusCode::OK,
        Json(GetDrinkStoresResponse {
            data: report.into(),
        }),
    )
        .into_response())
}
