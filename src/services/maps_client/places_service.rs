use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::types::{
    google_search_text_request::{
        GoogleSearchTextRequest, GoogleSearchTextRequestLocationRestriction, RankPreference,
    },
    google_search_text_response::GoogleSearchTextResponse,
    places_service_error::PlacesServiceError,
};
use crate::types::{coordinate::SearchRectangle, place_result::PlaceResult};

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";
const FIELD_MASK: &str = "places.displayName,places.formattedAddress,places.location,places.id";
pub const MAX_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct PlacesServiceConfig {
    pub api_key: String,
    pub host: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct TextSearchInput {
    pub query: String,
    pub rectangle: SearchRectangle,
    pub language: String,
    pub page_size: u32,
    pub rank_by: RankPreference,
}

/// One round-trip to a place search provider. No retries.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search_text(&self, input: TextSearchInput)
        -> Result<Vec<PlaceResult>, PlacesServiceError>;
}

#[derive(Clone)]
pub struct PlacesService {
    config: PlacesServiceConfig,
    client: reqwest::Client,
}

impl PlacesService {
    pub fn new(config: PlacesServiceConfig) -> Result<Self, PlacesServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PlacesServiceError::Client)?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PlaceSearch for PlacesService {
    async fn search_text(
        &self,
        input: TextSearchInput,
    ) -> Result<Vec<PlaceResult>, PlacesServiceError> {
        let url = format!(
            "{}/v1/places:searchText",
            self.config.host.trim_end_matches('/')
        );

        let body = GoogleSearchTextRequest {
            text_query: input.query,
            language_code: input.language,
            page_size: input.page_size.clamp(1, MAX_PAGE_SIZE),
            rank_preference: input.rank_by,
            location_restriction: GoogleSearchTextRequestLocationRestriction {
                rectangle: input.rectangle,
            },
        };

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(FIELD_MASK_HEADER, FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(PlacesServiceError::from_send)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlacesServiceError::Status { status, body });
        }

        let body = resp
            .json::<GoogleSearchTextResponse>()
            .await
            .map_err(PlacesServiceError::from_body)?;

        debug!("Provider returned {} places", body.places.len());

        Ok(body.places)
    }
}
