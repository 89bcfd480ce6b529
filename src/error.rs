//! Error handling for the opsman library.
//!
//! This module provides centralized error handling for everything the crate
//! can produce or forward: transport failures from the underlying HTTP stack,
//! status-guard failures, CSRF scraping failures and misuse of the live writer.
//! All errors implement the standard Error trait.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen when talking to Ops Manager.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// This variant captures internal errors that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Wraps failures while streaming request bodies from disk or writing
    /// downloaded archives.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("{source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the middleware stack wrapping the Reqwest client.
    #[error("{source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// A JSON body could not be encoded or decoded.
    #[error("invalid JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// The server answered with a status the caller did not expect.
    ///
    /// Holds the dumped response (status line, headers and body).
    #[error("request failed: unexpected response:\n{0}")]
    UnexpectedResponse(String),

    /// No `csrf-token` meta tag was found in an HTML page.
    #[error("could not find the csrf token")]
    TokenMissing,

    /// The live writer was started twice, or written to while idle.
    #[error("live writer misuse: {0}")]
    LiveWriterMisuse(&'static str),

    /// A download body did not match its declared Content-Length.
    #[error("invalid response length (expected {expected}, got {actual})")]
    InvalidResponseLength { expected: u64, actual: u64 },

    /// A file handed to a multipart form has no content.
    #[error("file provided has no content: {0}")]
    EmptyFile(PathBuf),

    /// The product to stage has not been uploaded.
    #[error("cannot find product {name} {version}")]
    ProductNotFound { name: String, version: String },

    /// Ops Manager could not produce its diagnostic report.
    #[error("diagnostic report is currently unavailable")]
    DiagnosticReportUnavailable,

    /// An Ops Manager version string could not be parsed.
    #[error("invalid version: '{0}'")]
    InvalidVersion(String),

    /// A request to a named Ops Manager endpoint failed.
    #[error("could not make api request to {endpoint} endpoint: {source}")]
    Endpoint {
        endpoint: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an error with the Ops Manager endpoint it came from.
    pub fn endpoint(endpoint: &'static str, source: impl Into<Error>) -> Self {
        Error::Endpoint {
            endpoint,
            source: Box::new(source.into()),
        }
    }
}

/// Result type alias for operations that can fail with an opsman error.
pub type Result<T> = std::result::Result<T, Error>;
