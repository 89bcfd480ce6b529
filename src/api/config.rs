//! Configuration structures and defaults for the API client.
//!
//! [`ApiConfig`] gathers everything [`ApiBuilder`](super::ApiBuilder) needs to
//! assemble an [`Api`](super::Api): where Ops Manager lives, how the HTTP
//! client behaves, and how progress is reported. Collaborators that tests want
//! to replace (the transport, the progress counters, the live writer) can be
//! injected directly.

use crate::http::{HttpClientConfig, Transport, DEFAULT_POLLING_INTERVAL};
use crate::progress::{LiveOutput, Progress, ProgressBarOpts};

use reqwest::header::HeaderMap;
use reqwest::Proxy;
use std::sync::Arc;
use std::time::Duration;

/// Configuration structure for the API client
#[derive(Clone)]
pub struct ApiConfig {
    /// Ops Manager URL or host name. `https` is assumed when no scheme is given.
    pub target: Option<String>,
    /// Time between two progress checks or elapsed-time lines.
    pub polling_interval: Duration,
    /// Progress bar options.
    pub progress_bar: ProgressBarOpts,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Total time allowed for a single request.
    pub request_timeout: Option<Duration>,
    /// Accept any certificate presented by the target.
    pub skip_ssl_validation: bool,
    /// Transport used instead of an HTTP client built from the fields above.
    pub transport: Option<Arc<dyn Transport>>,
    /// Counters used instead of a terminal progress bar.
    pub progress: Option<Arc<dyn Progress>>,
    /// Live writer used instead of standard error.
    pub live_output: Option<Arc<dyn LiveOutput>>,
}

impl ApiConfig {
    /// The HTTP client part of the configuration.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
            request_timeout: self.request_timeout,
            skip_ssl_validation: self.skip_ssl_validation,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("target", &self.target)
            .field("polling_interval", &self.polling_interval)
            .field("progress_bar", &self.progress_bar)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("request_timeout", &self.request_timeout)
            .field("skip_ssl_validation", &self.skip_ssl_validation)
            .field("transport", &self.transport.is_some())
            .field("progress", &self.progress.is_some())
            .field("live_output", &self.live_output.is_some())
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            target: None,
            polling_interval: DEFAULT_POLLING_INTERVAL,
            progress_bar: ProgressBarOpts::default(),
            headers: None,
            proxy: None,
            request_timeout: None,
            skip_ssl_validation: false,
            transport: None,
            progress: None,
            live_output: None,
        }
    }
}
