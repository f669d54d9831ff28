//! Shared constants for the pickmap crate.

// ── Endpoints ───────────────────────────────────────────────────

/// Suffix appended to a render endpoint path to reach its pixel lookup.
pub const PIXEL_LOOKUP_SUFFIX: &str = "/pixelLatLng";

/// Render endpoint path of the `bb` widget.
pub const BB_RENDER_PATH: &str = "/bb";

/// Image element id of the `bb` widget.
pub const BB_IMAGE_TARGET: &str = "bbImg";

/// Render endpoint path of the `blaner` widget.
pub const BLANER_RENDER_PATH: &str = "/blaner";

/// Image element id of the `blaner` widget.
pub const BLANER_IMAGE_TARGET: &str = "blanerImg";

// ── Query parameters ────────────────────────────────────────────

pub const PARAM_LAT0: &str = "lat0";
pub const PARAM_LNG0: &str = "lng0";
pub const PARAM_LAT1: &str = "lat1";
pub const PARAM_LNG1: &str = "lng1";
pub const PARAM_OFFSET_X: &str = "offsetX";
pub const PARAM_OFFSET_Y: &str = "offsetY";

// ── Map view ────────────────────────────────────────────────────

/// Latitude the map is centered on at widget creation.
pub const DEFAULT_CENTER_LAT: f64 = 60.14;

/// Longitude the map is centered on at widget creation.
pub const DEFAULT_CENTER_LNG: f64 = 10.25;

/// Zoom level at widget creation.
pub const DEFAULT_ZOOM: u8 = 11;

/// Base tile layer (Kartverket topo4 cache).
pub const DEFAULT_TILE_URL: &str =
    "https://opencache.statkart.no/gatekeeper/gk/gk.open_gmaps?layers=topo4&zoom={z}&x={x}&y={y}";

/// Attribution HTML shown for the default tile layer.
pub const DEFAULT_TILE_ATTRIBUTION: &str = "<a href=\"http://www.kartverket.no/\">Kartverket</a>";

// ── HTTP ────────────────────────────────────────────────────────

pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
