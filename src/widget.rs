//! A configured widget instance.
//!
//! `Widget` owns the selection state, the render dispatcher and the
//! refiner, and applies transition effects to the host's map view and image
//! surface. The stock page runs two of these side by side, differing only
//! in [`WidgetConfig`].
//!
//! ERROR HANDLING
//! ==============
//! Remote failures never touch the selection. A failed or unusable lookup
//! shows a failure signal on the surface; the next render or reset clears
//! it. Refinements arriving without a primary point are rejected and
//! logged.

use reqwest::Url;

use crate::config::WidgetConfig;
use crate::dispatch::{RenderDispatcher, RenderRequest};
use crate::error::PickError;
use crate::geo::{Coordinate, PixelOffset};
use crate::refine::{Lookup, LookupTicket, PixelLookup, Refiner, Settled};
use crate::selection::{Effect, SelectionState, Transition};
use crate::view::{ImageSurface, MapView};

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

/// Outcome of feeding a lookup response or refined point to the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The secondary point moved and this render was dispatched.
    Applied(RenderRequest),
    /// A newer click or selection change made the response irrelevant.
    Stale,
    /// The lookup failed; the failure signal is shown, selection unchanged.
    Failed(PickError),
    /// The refinement violated a precondition; nothing changed.
    Rejected(PickError),
}

pub struct Widget<M, S> {
    config: WidgetConfig,
    map: M,
    surface: S,
    state: SelectionState,
    dispatcher: RenderDispatcher,
    refiner: Refiner,
}

impl<M: MapView, S: ImageSurface> Widget<M, S> {
    /// Create an empty widget driving `map` and `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::InvalidBaseUrl`] if the configured base URL is
    /// unusable.
    pub fn new(config: WidgetConfig, map: M, surface: S) -> Result<Self, PickError> {
        let dispatcher = RenderDispatcher::new(&config.base()?, &config.render_path)?;
        let refiner = Refiner::new(&config.render_path);
        Ok(Self { config, map, surface, state: SelectionState::Empty, dispatcher, refiner })
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The URI most recently set as image source.
    #[must_use]
    pub fn current_image(&self) -> Option<&Url> {
        self.dispatcher.current()
    }

    #[must_use]
    pub fn lookup_state(&self) -> Lookup {
        self.refiner.state()
    }

    // --- Map interaction ---

    /// Handle a click on the live map. Returns the render it triggered.
    pub fn map_click(&mut self, point: Coordinate) -> Option<RenderRequest> {
        self.refiner.invalidate();
        let transition = self.state.on_map_click(point);
        tracing::debug!(widget = %self.config.name, lat = point.lat, lng = point.lng, "map click");
        self.commit(transition)
    }

    /// Remove both markers and forget the selection.
    pub fn reset(&mut self) {
        self.refiner.invalidate();
        let transition = self.state.on_reset();
        tracing::debug!(widget = %self.config.name, "selection reset");
        self.commit(transition);
        self.apply(Effect::ClearFailure);
    }

    /// Make `point` the primary point and center the map on it.
    pub fn set_position(&mut self, point: Coordinate) {
        self.refiner.invalidate();
        let transition = self.state.on_set_position(point);
        tracing::debug!(widget = %self.config.name, lat = point.lat, lng = point.lng, "position set");
        self.commit(transition);
    }

    /// Replace the secondary point with an already resolved coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::NoPrimaryPoint`] when nothing is selected; the
    /// widget is left unchanged.
    pub fn refine_second_point(&mut self, point: Coordinate) -> Result<RenderRequest, PickError> {
        let transition = match self.state.on_refined_second_point(point) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(widget = %self.config.name, error = %e, "refinement rejected");
                return Err(e);
            }
        };
        tracing::info!(widget = %self.config.name, lat = point.lat, lng = point.lng, "secondary point refined");
        self.commit(transition).ok_or(PickError::NoPrimaryPoint)
    }

    // --- Image interaction ---

    /// Start a pixel lookup for a click inside the rendered image.
    ///
    /// The returned ticket is fetched by the host and reported back through
    /// [`Widget::resolve_lookup`].
    ///
    /// # Errors
    ///
    /// Fails when no image is displayed or its URI lacks render context; the
    /// failure signal is shown in that case.
    pub fn image_click(&mut self, offset: PixelOffset) -> Result<LookupTicket, PickError> {
        match self.refiner.issue(self.dispatcher.current(), offset) {
            Ok(ticket) => Ok(ticket),
            Err(e) => {
                tracing::warn!(widget = %self.config.name, error = %e, "pixel lookup not issued");
                self.apply(Effect::ShowFailure(e.clone()));
                Err(e)
            }
        }
    }

    /// Feed the response of lookup `seq` back into the selection.
    pub fn resolve_lookup(&mut self, seq: u64, result: Result<Coordinate, PickError>) -> Resolution {
        match self.refiner.settle(seq, result) {
            Settled::Stale => Resolution::Stale,
            Settled::Current(Err(e)) => {
                tracing::warn!(widget = %self.config.name, seq, error = %e, "pixel lookup failed");
                self.apply(Effect::ShowFailure(e.clone()));
                Resolution::Failed(e)
            }
            Settled::Current(Ok(point)) => match self.refine_second_point(point) {
                Ok(req) => Resolution::Applied(req),
                Err(e) => Resolution::Rejected(e),
            },
        }
    }

    /// Issue, await and resolve one lookup in sequence.
    pub async fn refine<L: PixelLookup + ?Sized>(&mut self, lookup: &L, offset: PixelOffset) -> Resolution {
        let ticket = match self.image_click(offset) {
            Ok(ticket) => ticket,
            Err(e) => return Resolution::Failed(e),
        };
        let result = lookup.lookup(&ticket.uri).await;
        self.resolve_lookup(ticket.seq, result)
    }

    // --- Effects ---

    fn commit(&mut self, transition: Transition) -> Option<RenderRequest> {
        let render = transition.render_request();
        self.state = transition.state;
        for effect in transition.effects {
            self.apply(effect);
        }
        render
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::PlaceMarker { slot, at } => self.map.place_marker(slot, at),
            Effect::RemoveMarker(slot) => self.map.remove_marker(slot),
            Effect::PanTo(at) => self.map.pan_to(at),
            Effect::PanInside(at) => self.map.pan_inside(at),
            Effect::Render(req) => {
                let uri = self.dispatcher.dispatch(&req);
                self.surface.set_source(uri.as_str());
                self.surface.clear_failure();
            }
            Effect::ShowFailure(e) => self.surface.show_failure(&e),
            Effect::ClearFailure => self.surface.clear_failure(),
        }
    }
}
