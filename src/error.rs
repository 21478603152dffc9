use std::fmt;

/// Error types that can occur when running the Firebox assistant.
#[derive(Debug)]
pub enum FireboxError {
    /// Missing or invalid startup configuration (credential, model id)
    ConfigError(String),
    /// Transport or API faults from the generation endpoint
    UpstreamError(String),
    /// Image decode faults during upload intake
    DecodeError(String),
}

impl fmt::Display for FireboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireboxError::ConfigError(e) => write!(f, "Config Error: {}", e),
            FireboxError::UpstreamError(e) => write!(f, "Upstream Error: {}", e),
            FireboxError::DecodeError(e) => write!(f, "Decode Error: {}", e),
        }
    }
}

impl std::error::Error for FireboxError {}

/// Converts reqwest HTTP errors into upstream faults
impl From<reqwest::Error> for FireboxError {
    fn from(err: reqwest::Error) -> Self {
        FireboxError::UpstreamError(err.to_string())
    }
}

/// Converts image decode errors into intake faults
impl From<image::ImageError> for FireboxError {
    fn from(err: image::ImageError) -> Self {
        FireboxError::DecodeError(err.to_string())
    }
}
