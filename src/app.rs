use std::sync::Arc;

use crate::{
    middlewares::auth::auth_middleware, routes::apply_routes,
    services::drink_finder::search_pipeline::DrinkFinder, types::app_state::AppState,
};
use axum::{
    http::{header::AUTHORIZATION, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn gen_app(drink_finder: DrinkFinder, auth_key: Option<String>) -> Router {
    let cors_middleware = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([AUTHORIZATION]);
    let state = AppState {
        drink_finder: Arc::new(drink_finder),
        auth_key,
    };

    apply_routes(Router::new())
        .route("/", get(root))
        .layer(cors_middleware)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

async fn root() -> &'static str {
    "Drink finder is up"
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub google_server: mockito::ServerGuard,
}

#[cfg(test)]
const MOCK_CATALOG: &str = r#"[
    { "name": "迷客夏", "drink": ["紅茶", "綠茶"] },
    { "name": "五十嵐", "drink": ["紅茶", "冬瓜檸檬"] },
    { "name": "清心", "drink": ["綠茶"] }
]"#;

#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    gen_mock_app_with(None, std::time::Duration::from_secs(5)).await
}

#[cfg(test)]
pub async fn gen_mock_app_with_auth(auth_key: Option<String>) -> MockApp {
    gen_mock_app_with(auth_key, std::time::Duration::from_secs(5)).await
}

/// App wired to a fresh mockito server standing in for the places provider.
#[cfg(test)]
pub async fn gen_mock_app_with(auth_key: Option<String>, timeout: std::time::Duration) -> MockApp {
    use crate::services::{
        catalog::catalog_store::CatalogStore,
        drink_finder::search_pipeline::SearchSettings,
        maps_client::places_service::{PlacesService, PlacesServiceConfig},
    };

    let google_server = mockito::Server::new_async().await;

    let places = PlacesService::new(PlacesServiceConfig {
        api_key: "key".to_string(),
        host: google_server.url(),
        timeout,
    })
    .expect("Failed to build places service");
    let catalog = CatalogStore::from_json(MOCK_CATALOG).expect("Failed to parse mock catalog");

    let drink_finder = DrinkFinder::new(
        Arc::new(catalog),
        Arc::new(places),
        SearchSettings::default(),
    );

    MockApp {
        app: gen_app(drink_finder, auth_key),
        google_server,
    }
}
