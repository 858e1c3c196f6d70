use crate::{
    services::drink_finder::reconciler::MatchedStore, types::coordinate::SearchRectangle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    CatalogFiltered,
    RectangleComputed,
    AwaitingProvider,
    Reconciled,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Matched(Vec<MatchedStore>),
    /// The provider found no places at all inside the window.
    NoPlacesNearby,
    /// The provider found places but none of them is known to sell the drink.
    NoneSellDrink,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub catalog_matches: Vec<String>,
    pub places_nearby: usize,
    pub rectangle: SearchRectangle,
}

impl SearchReport {
    pub fn provider_returned_zero(&self) -> bool {
        matches!(self.outcome, SearchOutcome::NoPlacesNearby)
    }

    #[cfg(test)]
    pub fn stores(&self) -> &[MatchedStore] {
        match self.outcome {
            SearchOutcome::Matched(ref stores) => stores,
            _ => &[],
        }
    }
}
