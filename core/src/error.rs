//! Error types for the MyVariant client.
//!
//! # Design
//! Validation failures (`MissingId`, `MissingQuery`, `InvalidOptions`,
//! `InvalidUrl`) are raised by `build_*` methods before any request exists.
//! Status failures come from `parse_*` methods, and `Transport` from the
//! layer that actually talks to the network. `NotFound` gets a dedicated
//! variant because the service answers unknown variant ids with 404.

use std::fmt;

/// Prefix carried by every transport failure message.
pub const TRANSPORT_ERROR_PREFIX: &str = "error fetching from service: ";

/// Errors returned by `VariantClient` and `MyVariant`.
#[derive(Debug)]
pub enum ApiError {
    /// No variant id (or only blank ids) were supplied.
    MissingId,

    /// No query term (or only blank terms) were supplied.
    MissingQuery,

    /// An option failed validation: bad fields, zero size, unknown format.
    InvalidOptions(String),

    /// A passthru URL was empty or did not start with the configured base URL.
    InvalidUrl,

    /// The server returned 404.
    NotFound,

    /// The server returned a non-200 status other than 404.
    HttpError { status: u16, body: String },

    /// The response body was not JSON, or not the JSON shape expected.
    InvalidResponse(String),

    /// Flattened rows could not be written as CSV/TSV.
    Export(String),

    /// The request never produced a response.
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingId => write!(f, "no variant id supplied"),
            ApiError::MissingQuery => write!(f, "no query terms supplied"),
            ApiError::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            ApiError::InvalidUrl => write!(f, "invalid url"),
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::InvalidResponse(msg) => {
                write!(f, "invalid response: {msg}")
            }
            ApiError::Export(msg) => write!(f, "export failed: {msg}"),
            ApiError::Transport(msg) => write!(f, "{TRANSPORT_ERROR_PREFIX}{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<csv::Error> for ApiError {
    fn from(e: csv::Error) -> Self {
        ApiError::Export(e.to_string())
    }
}
