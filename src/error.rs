//! Error handling

use std::path::PathBuf;

/// Errors raised by the asset pipeline.
#[derive(Debug)]
pub enum AssetError {
    /// A required setting is missing or invalid, fatal before any work starts.
    Config(String),
    /// Filesystem failure
    Io(std::io::Error),
    /// The HTTP transport failed (connect, timeout, body read)
    Transport(reqwest::Error),
    /// The API answered with a non-success status and no usable error object
    HttpStatus(u16, String),
    /// The API answered with an `error` object
    Api(String),
    /// The response could not be understood
    InvalidResponse(String),
    /// Base64 payload did not decode
    Decode(base64::DecodeError),
    /// Image decoding/encoding failure
    Image(image::ImageError),
    /// WebP encoding failure
    WebP(String),
    /// An input path does not exist
    NotFound(PathBuf),
    /// Could not tell which image format a file is in
    UnknownFormat(PathBuf),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "Configuration error: {message}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Transport(err) => write!(f, "Request failed: {err}"),
            Self::HttpStatus(status, body) => write!(f, "HTTP {status}: {body}"),
            Self::Api(message) => write!(f, "{message}"),
            Self::InvalidResponse(message) => write!(f, "Invalid response: {message}"),
            Self::Decode(err) => write!(f, "Failed to base64-decode image: {err}"),
            Self::Image(err) => write!(f, "{err}"),
            Self::WebP(message) => write!(f, "WebP encoding failed: {message}"),
            Self::NotFound(path) => write!(f, "{} not found", path.display()),
            Self::UnknownFormat(path) => write!(f, "Unknown image format: {}", path.display()),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::Io(err)
    }
}

impl From<reqwest::Error> for AssetError {
    fn from(err: reqwest::Error) -> Self {
        AssetError::Transport(err)
    }
}

impl From<base64::DecodeError> for AssetError {
    fn from(err: base64::DecodeError) -> Self {
        AssetError::Decode(err)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        AssetError::Image(err)
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::InvalidResponse(err.to_string())
    }
}
