use thiserror::Error;

use crate::services::maps_client::types::places_service_error::PlacesServiceError;

/// Rejected before any lookup happens. Messages are shown to the user as-is.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Please enter the drink you want")]
    EmptyDrink,

    #[error("Still getting your location, please try again shortly")]
    LocationUnavailable,

    #[error("Location ({latitude}, {longitude}) is out of range")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    #[error("Searching at latitude {0} is not supported")]
    PolarLatitude(f64),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search input: {0}")]
    Input(#[from] InputError),

    #[error("place search failed: {0}")]
    Failed(#[from] PlacesServiceError),

    #[error("search {seq} was superseded by a newer search")]
    Superseded { seq: u64 },
}
