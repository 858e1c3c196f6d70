use axum::{routing::get, Router};

use crate::types::app_state::AppState;

mod get_catalog_drinks;
mod get_drink_stores;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route(
        "/drink-stores",
        get(get_drink_stores::get_drink_stores),
    )
    .route(
        "/catalog/drinks",
        get(get_catalog_drinks::get_catalog_drinks),
    )
}
