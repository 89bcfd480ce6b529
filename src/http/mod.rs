//! HTTP module containing the transports used to talk to Ops Manager.
//!
//! This module provides client setup, the request envelope, the
//! [`Transport`] capability and its implementations: a direct HTTP transport
//! and the progress-tracking decorator used for uploads and downloads.
//!
//! # Overview
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`request`] - [`Request`] and its streaming [`Body`]
//! - [`transport`] - The [`Transport`] trait and [`HttpTransport`]
//! - [`progress_transport`] - [`ProgressTransport`], bar then elapsed time
//! - [`download`] - Streaming a response body with progress
//!
//! # Examples
//!
//! ## Sending a Request
//!
//! ```rust,no_run
//! use opsman::http::{HttpClientConfig, HttpTransport, Request, Transport};
//! use reqwest::Method;
//!
//! # async fn example() -> Result<(), opsman::Error> {
//! let transport = HttpTransport::from_config("opsman.example.com", HttpClientConfig::default())?;
//! let response = transport
//!     .execute(Request::new(Method::GET, "/api/v0/info"))
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod download;
pub mod progress_transport;
pub mod request;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig};
pub use download::download_with_progress;
pub use progress_transport::{format_elapsed, ProgressTransport, TrackerOutcome, DEFAULT_POLLING_INTERVAL};
pub use request::{Body, Request};
pub use transport::{parse_target, HttpTransport, Transport};
