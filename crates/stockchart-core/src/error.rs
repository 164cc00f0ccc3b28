use thiserror::Error;

use crate::http_client::HttpError;

/// Validation errors raised at the host boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown preset '{value}', expected one of daily, weekly, monthly, yearly, max")]
    UnknownPreset { value: String },
}

/// Failure of a single chart or related-ticker fetch.
///
/// The session swallows every variant; callers using the fetchers directly
/// get the full classification.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("malformed url '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("network failure: {0}")]
    Network(#[from] HttpError),

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("response is not a decodable image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("response is not valid json: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("unexpected json shape: {0}")]
    UnexpectedShape(String),
}

impl FetchError {
    pub(crate) fn malformed_url(url: &str, error: impl std::fmt::Display) -> Self {
        Self::MalformedUrl {
            url: url.to_owned(),
            reason: error.to_string(),
        }
    }

    pub(crate) fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape(message.into())
    }
}
