pub mod catalog_error;
