pub mod catalog_store;
pub mod types;
