use std::sync::Arc;

use crate::services::drink_finder::search_pipeline::DrinkFinder;

#[derive(Clone)]
pub struct AppState {
    pub drink_finder: Arc<DrinkFinder>,
    pub auth_key: Option<String>,
}
