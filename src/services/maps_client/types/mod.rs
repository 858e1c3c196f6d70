pub mod google_search_text_request;
pub mod google_search_text_response;
pub mod places_service_error;
