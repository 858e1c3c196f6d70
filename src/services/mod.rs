pub mod catalog;
pub mod drink_finder;
pub mod maps_client;
