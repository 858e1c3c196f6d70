use crate::types::coordinate::{Coordinate, SearchRectangle};

/// Planar approximation of one degree of latitude.
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Searches closer to a pole than this are refused before the window is
/// computed; the longitude span diverges there.
pub const MAX_SEARCH_LATITUDE: f64 = 89.0;

/// Square-ish window of `radius_meters` around `center`, in degrees.
///
/// Good enough for a few hundred meters. The result is undefined at the
/// poles and does not wrap at the antimeridian.
pub fn compute_rectangle(center: Coordinate, radius_meters: f64) -> SearchRectangle {
    let lat_offset = radius_meters / METERS_PER_DEGREE;
    let lon_offset = radius_meters / (METERS_PER_DEGREE * center.latitude.to_radians().cos());

    SearchRectangle {
        low: Coordinate::new(center.latitude - lat_offset, center.longitude - lon_offset),
        high: Coordinate::new(center.latitude + lat_offset, center.longitude + lon_offset),
    }
}
