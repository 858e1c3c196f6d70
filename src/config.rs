use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::services::{
    drink_finder::search_pipeline::SearchSettings,
    maps_client::{
        places_service::{PlacesServiceConfig, MAX_PAGE_SIZE},
        types::google_search_text_request::RankPreference,
    },
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("GOOGLE_MAPS_API_KEY must not be empty")]
    MissingApiKey,

    #[error("search radius must be a positive number of meters, got {0}")]
    InvalidRadius(f64),

    #[error("search page size must be between 1 and 20, got {0}")]
    InvalidPageSize(u32),

    #[error("search timeout must be at least one second")]
    InvalidTimeout,
}

#[derive(Parser, Clone, Debug)]
#[command(name = "drink-finder-api")]
pub struct Config {
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub google_maps_api_key: String,

    #[arg(long, env = "GOOGLE_PLACES_HOST", default_value = "https://places.googleapis.com")]
    pub google_places_host: String,

    #[arg(long, env = "CATALOG_PATH", default_value = "data/drinking_data.json")]
    pub catalog_path: PathBuf,

    #[arg(long, env = "AUTH_KEY", hide_env_values = true)]
    pub auth_key: Option<String>,

    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind_addr: String,

    #[arg(long, env = "SEARCH_RADIUS_METERS", default_value_t = 800.0)]
    pub search_radius_meters: f64,

    #[arg(long, env = "SEARCH_TEXT_QUERY", default_value = "飲料")]
    pub search_text_query: String,

    #[arg(long, env = "SEARCH_LANGUAGE", default_value = "zh-TW")]
    pub search_language: String,

    #[arg(long, env = "SEARCH_PAGE_SIZE", default_value_t = 20)]
    pub search_page_size: u32,

    #[arg(
        long,
        env = "SEARCH_RANK_PREFERENCE",
        value_enum,
        default_value_t = RankPreference::Distance
    )]
    pub search_rank_preference: RankPreference,

    #[arg(long, env = "SEARCH_TIMEOUT_SECS", default_value_t = 5)]
    pub search_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.google_maps_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        if !(self.search_radius_meters.is_finite() && self.search_radius_meters > 0.0) {
            return Err(ConfigError::InvalidRadius(self.search_radius_meters));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.search_page_size) {
            return Err(ConfigError::InvalidPageSize(self.search_page_size));
        }

        if self.search_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    pub fn places_service_config(&self) -> PlacesServiceConfig {
        PlacesServiceConfig {
            api_key: self.google_maps_api_key.clone(),
            host: self.google_places_host.clone(),
            timeout: Duration::from_secs(self.search_timeout_secs),
        }
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            radius_meters: self.search_radius_meters,
            text_query: self.search_text_query.clone(),
            language: self.search_language.clone(),
            page_size: self.search_page_size,
            rank_by: self.search_rank_preference,
        }
    }
}
