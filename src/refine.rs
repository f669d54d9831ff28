//! Pixel refinement: map a click inside the rendered image back to a point.
//!
//! The lookup endpoint lives at `<render path>/pixelLatLng` and takes the
//! same four point parameters as the image it refines, plus `offsetX` and
//! `offsetY`. The request is built from the currently displayed image URI so
//! the server sees exactly the render the user clicked on.
//!
//! ORDERING
//! ========
//! Lookups are asynchronous and the user may click again before one
//! resolves. Every issued lookup gets a sequence number from a monotonic
//! counter; only the most recently issued one is `Pending`. A response whose
//! sequence number is not the pending one is stale and is dropped. Nothing
//! is aborted in flight.

use std::time::Duration;

use reqwest::Url;

use crate::config::LookupTimeouts;
use crate::consts::{PARAM_OFFSET_X, PARAM_OFFSET_Y, PIXEL_LOOKUP_SUFFIX};
use crate::dispatch::RenderRequest;
use crate::error::PickError;
use crate::geo::{Coordinate, PixelOffset};

#[cfg(test)]
#[path = "refine_test.rs"]
mod refine_test;

// =============================================================================
// TRANSPORT
// =============================================================================

/// Resolves a lookup URI to the coordinate under the clicked pixel.
#[async_trait::async_trait]
pub trait PixelLookup: Send + Sync {
    async fn lookup(&self, uri: &Url) -> Result<Coordinate, PickError>;
}

/// [`PixelLookup`] over HTTP GET with a JSON `{lat, lng}` response.
pub struct HttpPixelLookup {
    http: reqwest::Client,
}

impl HttpPixelLookup {
    /// # Errors
    ///
    /// Returns [`PickError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(timeouts: LookupTimeouts) -> Result<Self, PickError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| PickError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl PixelLookup for HttpPixelLookup {
    async fn lookup(&self, uri: &Url) -> Result<Coordinate, PickError> {
        let response = self
            .http
            .get(uri.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| PickError::LookupRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PickError::LookupRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(PickError::LookupStatus { status: status.as_u16(), body: text });
        }

        parse_coordinate(&text)
    }
}

/// Parse a lookup response body.
///
/// # Errors
///
/// Returns [`PickError::LookupParse`] unless the body is an object with
/// finite numeric `lat` and `lng`.
pub fn parse_coordinate(json: &str) -> Result<Coordinate, PickError> {
    let coordinate: Coordinate = serde_json::from_str(json).map_err(|e| PickError::LookupParse(e.to_string()))?;
    check_finite(coordinate)
}

fn check_finite(coordinate: Coordinate) -> Result<Coordinate, PickError> {
    if coordinate.is_finite() {
        Ok(coordinate)
    } else {
        Err(PickError::LookupParse(format!("non-finite coordinate {coordinate:?}")))
    }
}

// =============================================================================
// SEQUENCING
// =============================================================================

/// Refinement progress, tagged with the sequence number it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Lookup {
    /// No lookup outstanding.
    #[default]
    Idle,
    /// The lookup with this sequence number is the only one that may land.
    Pending(u64),
    /// The lookup with this sequence number landed and was accepted.
    Resolved(u64, Coordinate),
}

/// An issued lookup: the host fetches `uri` and reports back with `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub seq: u64,
    pub uri: Url,
}

/// What became of a lookup response handed to [`Refiner::settle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// The response belongs to the pending lookup; here is its result.
    Current(Result<Coordinate, PickError>),
    /// A newer lookup or selection change superseded this response.
    Stale,
}

/// Derives lookup URIs and decides which responses may land.
#[derive(Debug, Clone)]
pub struct Refiner {
    lookup_path: String,
    last_seq: u64,
    state: Lookup,
}

impl Refiner {
    /// Create a refiner for the render endpoint at `render_path`.
    #[must_use]
    pub fn new(render_path: &str) -> Self {
        let lookup_path = format!("{}{PIXEL_LOOKUP_SUFFIX}", render_path.trim_end_matches('/'));
        Self { lookup_path, last_seq: 0, state: Lookup::Idle }
    }

    #[must_use]
    pub fn lookup_path(&self) -> &str {
        &self.lookup_path
    }

    #[must_use]
    pub fn state(&self) -> Lookup {
        self.state
    }

    /// The lookup URI for a click at `offset` inside the image at `image_uri`.
    ///
    /// # Errors
    ///
    /// Fails if `image_uri` does not carry all four point parameters.
    pub fn lookup_uri(&self, image_uri: &Url, offset: PixelOffset) -> Result<Url, PickError> {
        RenderRequest::from_uri(image_uri)?;
        let mut uri = image_uri.clone();
        uri.set_path(&self.lookup_path);
        uri.set_fragment(None);
        uri.query_pairs_mut()
            .append_pair(PARAM_OFFSET_X, &offset.offset_x.to_string())
            .append_pair(PARAM_OFFSET_Y, &offset.offset_y.to_string());
        Ok(uri)
    }

    /// Start a lookup for a click on the currently displayed image.
    ///
    /// The click supersedes any pending lookup even when it fails here.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::NoRenderedImage`] when nothing is displayed, or
    /// the error from [`Refiner::lookup_uri`].
    pub fn issue(&mut self, image_uri: Option<&Url>, offset: PixelOffset) -> Result<LookupTicket, PickError> {
        self.state = Lookup::Idle;
        let image_uri = image_uri.ok_or(PickError::NoRenderedImage)?;
        let uri = self.lookup_uri(image_uri, offset)?;
        self.last_seq += 1;
        let seq = self.last_seq;
        self.state = Lookup::Pending(seq);
        tracing::debug!(seq, uri = %uri, "pixel lookup issued");
        Ok(LookupTicket { seq, uri })
    }

    /// Accept or drop the response for lookup `seq`.
    pub fn settle(&mut self, seq: u64, result: Result<Coordinate, PickError>) -> Settled {
        if self.state != Lookup::Pending(seq) {
            tracing::debug!(seq, state = ?self.state, "stale pixel lookup discarded");
            return Settled::Stale;
        }
        match result.and_then(check_finite) {
            Ok(coordinate) => {
                self.state = Lookup::Resolved(seq, coordinate);
                Settled::Current(Ok(coordinate))
            }
            Err(e) => {
                self.state = Lookup::Idle;
                Settled::Current(Err(e))
            }
        }
    }

    /// Make every outstanding lookup stale.
    pub fn invalidate(&mut self) {
        if let Lookup::Pending(seq) = self.state {
            tracing::debug!(seq, "pending pixel lookup superseded");
        }
        self.state = Lookup::Idle;
    }
}
