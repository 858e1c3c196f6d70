use urlencoding::encode;

use crate::{services::catalog::catalog_store::CatalogEntry, types::place_result::PlaceResult};

/// A provider place known to sell the queried drink.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedStore {
    pub place: PlaceResult,
}

impl MatchedStore {
    /// Google Maps search link pinned to the provider's place id.
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={}&query_place_id={}",
            encode(&self.place.display_name.text),
            encode(&self.place.id)
        )
    }
}

/// Keeps the places whose display name contains the name of any catalog
/// match, in provider order.
///
/// Plain byte-level containment: no case folding or whitespace handling, so
/// a catalog name that happens to be a substring of an unrelated chain's
/// name will match it too.
pub fn reconcile(catalog_matches: &[&CatalogEntry], places: &[PlaceResult]) -> Vec<MatchedStore> {
    places
        .iter()
        .filter(|p| {
            catalog_matches
                .iter()
                .any(|e| p.display_name.text.contains(e.name.as_str()))
        })
        .map(|p| MatchedStore { place: p.clone() })
        .collect()
}
