mod app;
mod config;
mod middlewares;
mod routes;
mod services;
mod types;
mod utils;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    services::{
        catalog::catalog_store::CatalogStore,
        drink_finder::search_pipeline::DrinkFinder,
        maps_client::places_service::PlacesService,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    config.validate()?;

    info!("Starting app...");

    let catalog = CatalogStore::load(&config.catalog_path)?;
    let places = PlacesService::new(config.places_service_config())?;
    let drink_finder = DrinkFinder::new(
        Arc::new(catalog),
        Arc::new(places),
        config.search_settings(),
    );

    let app = app::gen_app(drink_finder, config.auth_key.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
