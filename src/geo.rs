//! Geographic and pixel-space value types.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

/// A WGS84 point as produced by the map library or the pixel lookup endpoint.
///
/// Serializes as `{ "lat": .., "lng": .. }`, the wire shape of the lookup
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite (no NaN, no infinity).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Pixel position of a click relative to the top-left of the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelOffset {
    pub offset_x: i32,
    pub offset_y: i32,
}

impl PixelOffset {
    #[must_use]
    pub fn new(offset_x: i32, offset_y: i32) -> Self {
        Self { offset_x, offset_y }
    }
}
