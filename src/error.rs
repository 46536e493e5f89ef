// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Snapshot(String),
    Fetch(FetchError),
}

/// Failures while retrieving remote content (thumbnails, raw blobs, sprite sheets).
///
/// Kept `Clone` so results can travel inside Iced messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    Http { status: u16 },

    /// The request never produced a response (DNS, TLS, connection reset...).
    Transport(String),

    /// Bytes arrived but could not be decoded into an image.
    Decode(String),
}

impl FetchError {
    /// Returns the i18n message key used when the failure is shown inline.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FetchError::Http { .. } => "error-fetch-http",
            FetchError::Transport(_) => "error-fetch-transport",
            FetchError::Decode(_) => "error-fetch-decode",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http { status } => write!(f, "HTTP status {}", status),
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FetchError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Snapshot(e) => write!(f, "Snapshot Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Http {
                status: status.as_u16(),
            },
            None => FetchError::Transport(err.to_string()),
        }
    }
}

impl From<image_rs::ImageError> for FetchError {
    fn from(err: image_rs::ImageError) -> Self {
        FetchError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
