//! Selection state and its transitions.
//!
//! `SelectionState` is the only persistent state of a widget. Every
//! transition is a pure function that consumes the current state and returns
//! the next one together with the side effects the host must perform, so the
//! whole state machine is testable without a map or a network.
//!
//! Rules:
//! - the first map click becomes the primary point; it only changes again
//!   through reset or set-position;
//! - every later map click replaces the secondary point and emits a render;
//! - a refinement replaces the secondary point, keeps the primary, renders.

use crate::dispatch::RenderRequest;
use crate::error::PickError;
use crate::geo::Coordinate;

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

/// Which of the two markers an effect targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSlot {
    /// Marker for the first selected point.
    Primary,
    /// Marker for the second selected point.
    Secondary,
}

/// How many points are selected, and where.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    /// Nothing selected yet, or just reset.
    #[default]
    Empty,
    /// Only the primary point exists.
    FirstPlaced(Coordinate),
    /// Primary and secondary points exist.
    BothPlaced(Coordinate, Coordinate),
}

/// A side effect produced by a transition, applied by the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show the marker in `slot` at `at`, moving it if already shown.
    PlaceMarker { slot: MarkerSlot, at: Coordinate },
    /// Take the marker in `slot` off the map. No-op if not shown.
    RemoveMarker(MarkerSlot),
    /// Center the map on a point.
    PanTo(Coordinate),
    /// Pan the minimum amount needed for a point to be visible.
    PanInside(Coordinate),
    /// Request a new rendered image.
    Render(RenderRequest),
    /// Signal that a selection attempt failed and may be retried.
    ShowFailure(PickError),
    /// Remove a previously shown failure signal.
    ClearFailure,
}

/// Result of a transition: the next state plus effects, in application order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SelectionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: SelectionState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    /// The render request emitted by this transition, if any.
    #[must_use]
    pub fn render_request(&self) -> Option<RenderRequest> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Render(req) => Some(*req),
            _ => None,
        })
    }
}

impl SelectionState {
    /// The primary point, if placed.
    #[must_use]
    pub fn primary(&self) -> Option<Coordinate> {
        match self {
            Self::Empty => None,
            Self::FirstPlaced(p0) | Self::BothPlaced(p0, _) => Some(*p0),
        }
    }

    /// The secondary point, if placed.
    #[must_use]
    pub fn secondary(&self) -> Option<Coordinate> {
        match self {
            Self::BothPlaced(_, p1) => Some(*p1),
            _ => None,
        }
    }

    /// The render request for the current points. Only `BothPlaced` has one.
    #[must_use]
    pub fn render_request(&self) -> Option<RenderRequest> {
        match self {
            Self::BothPlaced(p0, p1) => Some(RenderRequest::between(*p0, *p1)),
            _ => None,
        }
    }

    /// Handle a click on the live map.
    #[must_use]
    pub fn on_map_click(self, point: Coordinate) -> Transition {
        match self {
            Self::Empty => Transition::new(
                Self::FirstPlaced(point),
                vec![Effect::PlaceMarker { slot: MarkerSlot::Primary, at: point }],
            ),
            Self::FirstPlaced(p0) | Self::BothPlaced(p0, _) => Self::place_secondary(p0, point, None),
        }
    }

    /// Clear both markers and return to `Empty`, from any state.
    #[must_use]
    pub fn on_reset(self) -> Transition {
        Transition::new(
            Self::Empty,
            vec![
                Effect::RemoveMarker(MarkerSlot::Primary),
                Effect::RemoveMarker(MarkerSlot::Secondary),
            ],
        )
    }

    /// Replace the secondary point with a coordinate resolved from the image.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::NoPrimaryPoint`] when called on `Empty`; the
    /// state is left untouched in that case.
    pub fn on_refined_second_point(self, point: Coordinate) -> Result<Transition, PickError> {
        let p0 = self.primary().ok_or(PickError::NoPrimaryPoint)?;
        Ok(Self::place_secondary(p0, point, Some(Effect::PanInside(point))))
    }

    /// Jump to a known position: it becomes the primary point, the secondary
    /// point is dropped and the map is centered on it.
    #[must_use]
    pub fn on_set_position(self, point: Coordinate) -> Transition {
        Transition::new(
            Self::FirstPlaced(point),
            vec![
                Effect::PanTo(point),
                Effect::PlaceMarker { slot: MarkerSlot::Primary, at: point },
                Effect::RemoveMarker(MarkerSlot::Secondary),
            ],
        )
    }

    fn place_secondary(p0: Coordinate, p1: Coordinate, pan: Option<Effect>) -> Transition {
        let mut effects = vec![Effect::PlaceMarker { slot: MarkerSlot::Secondary, at: p1 }];
        effects.extend(pan);
        effects.push(Effect::Render(RenderRequest::between(p0, p1)));
        Transition::new(Self::BothPlaced(p0, p1), effects)
    }
}
