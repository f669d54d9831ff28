//! Errors produced by selection, dispatch and refinement.

/// Errors produced by widget operations.
///
/// Variants carry strings rather than source errors so the type stays
/// `Clone` and can travel inside an [`crate::Effect`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickError {
    /// A refinement arrived while no primary point exists.
    #[error("no primary point selected")]
    NoPrimaryPoint,

    /// An image click arrived before any render was dispatched.
    #[error("no rendered image to refine against")]
    NoRenderedImage,

    /// The current image source is not a usable URI.
    #[error("invalid image source: {0}")]
    InvalidImageSource(String),

    /// A required query parameter is absent from a render URI.
    #[error("missing query parameter '{0}'")]
    MissingQueryParam(&'static str),

    /// A query parameter is present but does not parse as a float.
    #[error("failed to parse '{name}': {value}")]
    BadQueryParam { name: &'static str, value: String },

    /// The pixel lookup request failed in transport.
    #[error("lookup request failed: {0}")]
    LookupRequest(String),

    /// The pixel lookup endpoint returned a non-success status.
    #[error("lookup response error: status {status}")]
    LookupStatus { status: u16, body: String },

    /// The pixel lookup body is not a `{lat, lng}` object with finite values.
    #[error("lookup response parse failed: {0}")]
    LookupParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The configured base URL cannot be used to resolve endpoints.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl PickError {
    /// Stable machine-readable code for display surfaces and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoPrimaryPoint => "E_NO_PRIMARY_POINT",
            Self::NoRenderedImage => "E_NO_RENDERED_IMAGE",
            Self::InvalidImageSource(_) => "E_INVALID_IMAGE_SOURCE",
            Self::MissingQueryParam(_) => "E_MISSING_QUERY_PARAM",
            Self::BadQueryParam { .. } => "E_BAD_QUERY_PARAM",
            Self::LookupRequest(_) => "E_LOOKUP_REQUEST",
            Self::LookupStatus { .. } => "E_LOOKUP_STATUS",
            Self::LookupParse(_) => "E_LOOKUP_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::InvalidBaseUrl { .. } => "E_INVALID_BASE_URL",
        }
    }

    /// Whether repeating the same image click might succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::LookupRequest(_) | Self::LookupStatus { status: 429 | 500..=599, .. })
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
