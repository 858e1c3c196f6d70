use serde::{Deserialize, Serialize};

/// A point in WGS84 degrees. Serialized with the field names the place
/// search provider uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// NaN components are out of range.
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRectangle {
    pub low: Coordinate,
    pub high: Coordinate,
}

impl SearchRectangle {
    /// Strict containment, edges excluded.
    #[cfg(test)]
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.low.latitude < point.latitude
            && point.latitude < self.high.latitude
            && self.low.longitude < point.longitude
            && point.longitude < self.high.longitude
    }
}
