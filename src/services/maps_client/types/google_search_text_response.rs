use serde::{Deserialize, Serialize};

use crate::types::place_result::PlaceResult;

/// The provider answers `{}` when nothing is in range, so `places` is
/// optional on the wire.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GoogleSearchTextResponse {
    #[serde(default)]
    pub places: Vec<PlaceResult>,
}
