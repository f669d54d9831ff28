//! Render requests and the dispatcher that turns them into image sources.
//!
//! The render endpoint takes the two points as `lat0`, `lng0`, `lat1`, `lng1`
//! query parameters and answers with an image. Dispatching never waits for
//! that image: the URI is handed to the display surface, and a newer
//! dispatch simply overwrites the previous source.

use reqwest::Url;

use crate::consts::{PARAM_LAT0, PARAM_LAT1, PARAM_LNG0, PARAM_LNG1};
use crate::error::PickError;
use crate::geo::Coordinate;

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

/// Query payload of a render: the primary then the secondary point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub lat0: f64,
    pub lng0: f64,
    pub lat1: f64,
    pub lng1: f64,
}

impl RenderRequest {
    #[must_use]
    pub fn between(p0: Coordinate, p1: Coordinate) -> Self {
        Self { lat0: p0.lat, lng0: p0.lng, lat1: p1.lat, lng1: p1.lng }
    }

    #[must_use]
    pub fn primary(&self) -> Coordinate {
        Coordinate::new(self.lat0, self.lng0)
    }

    #[must_use]
    pub fn secondary(&self) -> Coordinate {
        Coordinate::new(self.lat1, self.lng1)
    }

    /// Parse the four point parameters back out of a render URI.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::MissingQueryParam`] if a parameter is absent and
    /// [`PickError::BadQueryParam`] if one does not parse as `f64`.
    pub fn from_uri(uri: &Url) -> Result<Self, PickError> {
        Ok(Self {
            lat0: query_f64(uri, PARAM_LAT0)?,
            lng0: query_f64(uri, PARAM_LNG0)?,
            lat1: query_f64(uri, PARAM_LAT1)?,
            lng1: query_f64(uri, PARAM_LNG1)?,
        })
    }

    /// Replace the query of `uri` with this request's parameters.
    ///
    /// Values are written with `f64`'s shortest round-trip formatting, so
    /// nothing is lost between the click and the server.
    pub fn write_query(&self, uri: &mut Url) {
        uri.set_query(None);
        uri.query_pairs_mut()
            .append_pair(PARAM_LAT0, &self.lat0.to_string())
            .append_pair(PARAM_LNG0, &self.lng0.to_string())
            .append_pair(PARAM_LAT1, &self.lat1.to_string())
            .append_pair(PARAM_LNG1, &self.lng1.to_string());
    }
}

fn query_f64(uri: &Url, name: &'static str) -> Result<f64, PickError> {
    let (_, raw) = uri
        .query_pairs()
        .find(|(key, _)| key == name)
        .ok_or(PickError::MissingQueryParam(name))?;
    raw.parse::<f64>()
        .map_err(|_| PickError::BadQueryParam { name, value: raw.into_owned() })
}

/// Resolve `path` against `base`, dropping any query or fragment of `base`.
///
/// # Errors
///
/// Returns [`PickError::InvalidBaseUrl`] when `base` cannot carry a path
/// (e.g. `data:` or `mailto:` URLs).
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url, PickError> {
    if base.cannot_be_a_base() {
        return Err(PickError::InvalidBaseUrl {
            url: base.to_string(),
            reason: "URL cannot be a base".into(),
        });
    }
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Builds render URIs and remembers the one most recently handed out.
#[derive(Debug, Clone)]
pub struct RenderDispatcher {
    endpoint: Url,
    current: Option<Url>,
}

impl RenderDispatcher {
    /// Create a dispatcher for the render endpoint at `render_path`.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::InvalidBaseUrl`] if `base` cannot carry a path.
    pub fn new(base: &Url, render_path: &str) -> Result<Self, PickError> {
        Ok(Self { endpoint: endpoint_url(base, render_path)?, current: None })
    }

    /// The render endpoint without query.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The render URI for `req`, without recording it.
    #[must_use]
    pub fn uri_for(&self, req: &RenderRequest) -> Url {
        let mut uri = self.endpoint.clone();
        req.write_query(&mut uri);
        uri
    }

    /// Build the render URI for `req` and make it the current image source.
    pub fn dispatch(&mut self, req: &RenderRequest) -> Url {
        let uri = self.uri_for(req);
        tracing::debug!(uri = %uri, "render dispatched");
        self.current = Some(uri.clone());
        uri
    }

    /// The most recently dispatched render URI.
    #[must_use]
    pub fn current(&self) -> Option<&Url> {
        self.current.as_ref()
    }
}
