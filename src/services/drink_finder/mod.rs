pub mod geo_window;
pub mod reconciler;
pub mod search_pipeline;
pub mod search_sequencer;
pub mod types;
