//! Contracts for the collaborators a widget drives.
//!
//! The map library and the image element are owned by the host page. The
//! widget only ever talks to them through these traits, which keeps the
//! selection logic free of any rendering or projection concerns.

use crate::error::PickError;
use crate::geo::Coordinate;
use crate::selection::MarkerSlot;

/// Thin adapter over the host's mapping library.
pub trait MapView {
    /// Show the marker in `slot` at `at`, moving it if already shown.
    fn place_marker(&mut self, slot: MarkerSlot, at: Coordinate);

    /// Remove the marker in `slot`. Must be a no-op when it is not shown.
    fn remove_marker(&mut self, slot: MarkerSlot);

    /// Center the map on `at`.
    fn pan_to(&mut self, at: Coordinate);

    /// Pan just enough for `at` to be inside the visible area.
    fn pan_inside(&mut self, at: Coordinate);
}

/// The element showing the rendered image.
pub trait ImageSurface {
    /// Replace the image source. A slower earlier load may still finish
    /// later; the surface decides what that looks like.
    fn set_source(&mut self, uri: &str);

    /// Show a retry-able failure signal for `error`.
    fn show_failure(&mut self, error: &PickError);

    /// Remove the failure signal, if shown.
    fn clear_failure(&mut self);
}
