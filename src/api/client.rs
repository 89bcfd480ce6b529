use super::ApiBuilder;
use crate::error::{Error, Result};
use crate::http::{Body, ProgressTransport, Request, Transport};
use crate::progress::Progress;
use crate::utils::ContentSubmission;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Entry point to the Ops Manager API.
///
/// Plain calls go straight to the underlying transport. Uploads and the
/// installation export go through a [`ProgressTransport`] wrapping that same
/// transport.
pub struct Api {
    client: Arc<dyn Transport>,
    progress_client: ProgressTransport,
    progress: Arc<dyn Progress>,
}

impl Api {
    pub(crate) fn new(
        client: Arc<dyn Transport>,
        progress_client: ProgressTransport,
        progress: Arc<dyn Progress>,
    ) -> Self {
        Self {
            client,
            progress_client,
            progress,
        }
    }

    /// Shortcut for [`ApiBuilder::new`].
    pub fn builder() -> ApiBuilder {
        ApiBuilder::new()
    }

    /// The transport used for plain calls.
    pub fn client(&self) -> &Arc<dyn Transport> {
        &self.client
    }

    /// The transport used for uploads and downloads.
    pub fn progress_client(&self) -> &ProgressTransport {
        &self.progress_client
    }

    /// The counters uploads and downloads report to.
    pub fn progress(&self) -> Arc<dyn Progress> {
        self.progress.clone()
    }

    /// Send `request` directly, naming `endpoint` in transport errors.
    pub(crate) async fn send(&self, endpoint: &'static str, request: Request) -> Result<Response> {
        self.client
            .execute(request)
            .await
            .map_err(|e| Error::endpoint(endpoint, e))
    }

    /// Send `request` through the progress transport.
    pub(crate) async fn send_with_progress(
        &self,
        endpoint: &'static str,
        request: Request,
    ) -> Result<Response> {
        self.progress_client
            .execute(request)
            .await
            .map_err(|e| Error::endpoint(endpoint, e))
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("polling_interval", &self.progress_client.polling_interval())
            .finish_non_exhaustive()
    }
}

/// Read a JSON body.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// A streaming upload with its declared length and content type.
#[derive(Debug)]
pub struct UploadInput {
    pub body: Body,
    pub content_length: i64,
    pub content_type: String,
}

impl UploadInput {
    pub(crate) fn into_request(self, method: Method, path: &str) -> Result<Request> {
        let content_type = HeaderValue::from_str(&self.content_type)
            .map_err(|e| Error::Internal(format!("invalid content type: {}", e)))?;
        Ok(Request::new(method, path)
            .header(CONTENT_TYPE, content_type)
            .body(self.body, self.content_length))
    }
}

impl From<ContentSubmission> for UploadInput {
    fn from(submission: ContentSubmission) -> Self {
        Self {
            body: submission.body,
            content_length: submission.content_length,
            content_type: submission.content_type,
        }
    }
}
