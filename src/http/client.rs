//! HTTP client setup and middleware configuration.
//!
//! This module provides HTTP client creation for talking to Ops Manager: a
//! reqwest client wrapped in the tracing middleware, with optional proxy,
//! default headers, request timeout and certificate verification switch.
//!
//! # Examples
//!
//! ## Basic Client Creation
//!
//! ```rust
//! use opsman::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::default();
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client with Custom Configuration
//!
//! ```rust
//! use opsman::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "om/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     proxy: None,
//!     headers: Some(headers),
//!     request_timeout: Some(Duration::from_secs(1800)),
//!     skip_ssl_validation: false,
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, redirect::Policy, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Total time allowed for a single request, including the response body.
    pub request_timeout: Option<Duration>,
    /// Accept any certificate presented by the target.
    pub skip_ssl_validation: bool,
}

/// Creates an HTTP client with middleware configuration.
///
/// This function sets up a reqwest client with:
/// - Tracing middleware for request/response logging
/// - Optional proxy support
/// - Optional default headers
/// - Optional request timeout
///
/// Redirects are handed back to the caller instead of being followed, and
/// requests are never retried.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder().redirect(Policy::none());

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(timeout) = config.request_timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    #[cfg(any(feature = "default", feature = "rustls"))]
    {
        inner_client_builder =
            inner_client_builder.danger_accept_invalid_certs(config.skip_ssl_validation);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
        assert!(config.request_timeout.is_none());
        assert!(!config.skip_ssl_validation);
    }

    #[test]
    fn test_create_http_client_with_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("test-agent"));

        let config = HttpClientConfig {
            headers: Some(headers),
            request_timeout: Some(Duration::from_secs(5)),
            skip_ssl_validation: true,
            ..HttpClientConfig::default()
        };

        assert!(create_http_client(config).is_ok());
    }
}
