use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::types::coordinate::SearchRectangle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankPreference {
    Distance,
    Relevance,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleSearchTextRequestLocationRestriction {
    pub rectangle: SearchRectangle,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSearchTextRequest {
    pub text_query: String,
    pub language_code: String,
    pub page_size: u32,
    pub rank_preference: RankPreference,
    pub location_restriction: GoogleSearchTextRequestLocationRestriction,
}
