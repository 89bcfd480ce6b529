//! Builder pattern implementation for creating [`Api`] instances.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use opsman::api::ApiBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), opsman::Error> {
//! let api = ApiBuilder::new()
//!     .target("opsman.example.com")
//!     .polling_interval(Duration::from_secs(2))
//!     .request_timeout(Duration::from_secs(1800))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Hidden Progress
//!
//! ```rust
//! use opsman::api::ApiBuilder;
//!
//! # fn example() -> Result<(), opsman::Error> {
//! // Count bytes without drawing bars or elapsed-time lines.
//! let api = ApiBuilder::hidden().target("opsman.example.com").build()?;
//! # Ok(())
//! # }
//! ```

use super::{Api, ApiConfig};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, ProgressTransport, Transport};
use crate::progress::{LiveOutput, LiveWriter, Progress, ProgressBarOpts, ProgressView};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A builder used to create an [`Api`].
#[derive(Debug, Default)]
pub struct ApiBuilder {
    config: ApiConfig,
}

impl ApiBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        ApiBuilder::default()
    }

    /// Convenience function to hide the progress bar and the live writer.
    pub fn hidden() -> Self {
        let mut builder = ApiBuilder::default();
        builder.config.progress_bar = ProgressBarOpts::hidden();
        builder
    }

    /// Sets the Ops Manager target.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.config.target = Some(target.into());
        self
    }

    /// Set the time between two progress checks or elapsed-time lines.
    pub fn polling_interval(mut self, polling_interval: Duration) -> Self {
        self.config.polling_interval = polling_interval;
        self
    }

    /// Set the progress bar options.
    pub fn progress_bar(mut self, progress_bar: ProgressBarOpts) -> Self {
        self.config.progress_bar = progress_bar;
        self
    }

    /// Send every request through `proxy`.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the total time allowed for a single request.
    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.config.request_timeout = Some(request_timeout);
        self
    }

    /// Accept any certificate presented by the target.
    pub fn skip_ssl_validation(mut self, skip: bool) -> Self {
        self.config.skip_ssl_validation = skip;
        self
    }

    /// Use `transport` instead of building an HTTP client.
    ///
    /// Target, proxy, headers, timeout and certificate options are then
    /// ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Report progress to `progress` instead of a terminal bar.
    pub fn progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.config.progress = Some(progress);
        self
    }

    /// Write elapsed-time lines to `live_output` instead of standard error.
    pub fn live_output(mut self, live_output: Arc<dyn LiveOutput>) -> Self {
        self.config.live_output = Some(live_output);
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    ///
    /// See also [`header()`].
    ///
    /// [`header()`]: ApiBuilder::header
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use opsman::api::ApiBuilder;
    ///
    /// let auth = HeaderValue::from_static("Bearer some-token");
    ///
    /// let builder = ApiBuilder::new()
    ///     .target("opsman.example.com")
    ///     .header(header::USER_AGENT, HeaderValue::from_static("om"))
    ///     .header(header::AUTHORIZATION, auth);
    /// ```
    ///
    /// See also [`headers()`].
    ///
    /// [`headers()`]: ApiBuilder::headers
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// The configuration collected so far.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Create the [`Api`] with the specified options.
    ///
    /// Fails when no transport was injected and the target is missing or
    /// cannot be parsed, or when the HTTP client cannot be built.
    pub fn build(self) -> Result<Api> {
        let config = self.config;

        let client: Arc<dyn Transport> = match config.transport.clone() {
            Some(transport) => transport,
            None => {
                let target = config
                    .target
                    .as_deref()
                    .ok_or_else(|| Error::InvalidUrl("no Ops Manager target configured".into()))?;
                Arc::new(HttpTransport::from_config(
                    target,
                    config.http_client_config(),
                )?)
            }
        };

        let progress: Arc<dyn Progress> = match config.progress.clone() {
            Some(progress) => progress,
            None => Arc::new(ProgressView::new(config.progress_bar.clone())),
        };

        let live: Arc<dyn LiveOutput> = match config.live_output.clone() {
            Some(live) => live,
            None if config.progress_bar.is_enabled() => Arc::new(LiveWriter::stderr()),
            None => Arc::new(LiveWriter::hidden()),
        };

        let progress_client =
            ProgressTransport::new(client.clone(), progress.clone(), live)
                .with_polling_interval(config.polling_interval);
        debug!(
            "api client ready, polling every {:?}",
            progress_client.polling_interval()
        );

        Ok(Api::new(client, progress_client, progress))
    }
}
