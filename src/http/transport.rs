//! The request/response capability every client in this crate is built on.

use super::{create_http_client, HttpClientConfig, Request};
use crate::error::{Error, Result};

use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Response, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;
use tracing::debug;

/// Sends one [`Request`] and hands back the server's [`Response`].
///
/// Implementations are either a direct HTTP client or a decorator around
/// another transport (progress tracking, authentication, ...). Distinct
/// requests may be sent concurrently.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the response head.
    async fn execute(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request).await
    }
}

/// [`Transport`] sending requests to an Ops Manager target over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ClientWithMiddleware,
    target: Url,
}

impl HttpTransport {
    /// Send requests through `client`, resolving paths against `target`.
    pub fn new(client: ClientWithMiddleware, target: Url) -> Self {
        Self { client, target }
    }

    /// Parse `target` and build a client from `config`.
    pub fn from_config(target: &str, config: HttpClientConfig) -> Result<Self> {
        let target = parse_target(target)?;
        let client = create_http_client(config)?;
        Ok(Self::new(client, target))
    }

    /// The Ops Manager base URL.
    pub fn target(&self) -> &Url {
        &self.target
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.target.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "The path \"{}\" cannot be joined to \"{}\": {}",
                path, self.target, e
            ))
        })
    }
}

/// Parse an Ops Manager target, defaulting the scheme to `https`.
pub fn parse_target(target: &str) -> Result<Url> {
    let candidate = if target.contains("://") {
        target.to_string()
    } else {
        format!("https://{}", target)
    };
    Url::parse(&candidate).map_err(|e| {
        Error::InvalidUrl(format!("The target \"{}\" cannot be parsed: {}", target, e))
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let url = self.url_for(request.path())?;
        let (method, _, headers, body, content_length) = request.into_parts();
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            // hyper enforces a declared length against what the stream yields.
            if content_length >= 0 {
                builder = builder.header(CONTENT_LENGTH, content_length);
            }
            builder = builder.body(reqwest::Body::wrap_stream(body.into_stream()));
        }

        Ok(builder.send().await?)
    }
}
