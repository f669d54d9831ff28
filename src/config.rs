//! Widget configuration: presets for the two stock widgets and environment
//! loading for custom deployments.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::consts::{
    BB_IMAGE_TARGET, BB_RENDER_PATH, BLANER_IMAGE_TARGET, BLANER_RENDER_PATH, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_LOOKUP_TIMEOUT_SECS, DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_URL, DEFAULT_ZOOM,
};
use crate::error::PickError;
use crate::geo::Coordinate;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Timeouts applied to pixel lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LookupTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_LOOKUP_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Map view at widget creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for InitialView {
    fn default() -> Self {
        Self { center: Coordinate::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG), zoom: DEFAULT_ZOOM }
    }
}

/// Base tile layer handed to the mapping library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self { url: DEFAULT_TILE_URL.to_string(), attribution: DEFAULT_TILE_ATTRIBUTION.to_string() }
    }
}

/// Everything that distinguishes one widget instance from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Label used in log fields.
    pub name: String,
    /// Origin the endpoints are resolved against.
    pub base_url: String,
    /// Render endpoint path; the lookup endpoint hangs off it.
    pub render_path: String,
    /// DOM id of the image element.
    pub image_target: String,
    #[serde(default)]
    pub initial_view: InitialView,
    #[serde(default)]
    pub tile_layer: TileLayer,
    #[serde(default)]
    pub timeouts: LookupTimeouts,
}

impl WidgetConfig {
    /// The `bb` widget served from `base_url`.
    #[must_use]
    pub fn bb(base_url: &str) -> Self {
        Self::preset("bb", base_url, BB_RENDER_PATH, BB_IMAGE_TARGET)
    }

    /// The `blaner` widget served from `base_url`.
    #[must_use]
    pub fn blaner(base_url: &str) -> Self {
        Self::preset("blaner", base_url, BLANER_RENDER_PATH, BLANER_IMAGE_TARGET)
    }

    fn preset(name: &str, base_url: &str, render_path: &str, image_target: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            render_path: render_path.to_string(),
            image_target: image_target.to_string(),
            initial_view: InitialView::default(),
            tile_layer: TileLayer::default(),
            timeouts: LookupTimeouts::default(),
        }
    }

    /// Build config from environment variables named `<PREFIX>_*`.
    ///
    /// Required:
    /// - `<PREFIX>_BASE_URL`
    ///
    /// Optional:
    /// - `<PREFIX>_RENDER_PATH`: default `/<prefix in lowercase>`
    /// - `<PREFIX>_IMAGE_TARGET`: default `<prefix in lowercase>Img`
    /// - `<PREFIX>_LOOKUP_TIMEOUT_SECS`: default 30
    /// - `<PREFIX>_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`PickError::ConfigParse`] if the base URL is missing or a
    /// timeout is not a non-negative integer, and
    /// [`PickError::InvalidBaseUrl`] if the base URL does not parse.
    pub fn from_env(prefix: &str) -> Result<Self, PickError> {
        let name = prefix.to_ascii_lowercase();
        let key = |suffix: &str| format!("{prefix}_{suffix}");

        let base_url = std::env::var(key("BASE_URL"))
            .map_err(|_| PickError::ConfigParse(format!("{} not set", key("BASE_URL"))))?;
        let render_path = std::env::var(key("RENDER_PATH")).unwrap_or_else(|_| format!("/{name}"));
        let image_target = std::env::var(key("IMAGE_TARGET")).unwrap_or_else(|_| format!("{name}Img"));
        let timeouts = LookupTimeouts {
            request_secs: env_parse_u64(&key("LOOKUP_TIMEOUT_SECS"), DEFAULT_LOOKUP_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64(&key("CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        let config = Self {
            name,
            base_url,
            render_path,
            image_target,
            initial_view: InitialView::default(),
            tile_layer: TileLayer::default(),
            timeouts,
        };
        config.base()?;
        Ok(config)
    }

    /// The parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn base(&self) -> Result<Url, PickError> {
        Url::parse(&self.base_url)
            .map_err(|e| PickError::InvalidBaseUrl { url: self.base_url.clone(), reason: e.to_string() })
    }
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, PickError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| PickError::ConfigParse(format!("{key}: expected seconds, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
