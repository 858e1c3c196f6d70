pub mod search_error;
pub mod search_report;
