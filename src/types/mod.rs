pub mod app_state;
pub mod coordinate;
pub mod place_result;
