//! Response-body counterpart of the progress transport.
//!
//! The progress transport only counts request bodies. Callers that download
//! a large response stream it through [`download_with_progress`] once the
//! response head has arrived.

use crate::error::{Error, Result};
use crate::progress::{ByteCounter, Progress};
use crate::utils::content_length::declared_length;

use futures::StreamExt;
use reqwest::Response;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Stream the body of `response` into `writer`, drawing progress on `progress`.
///
/// The total is taken from the response Content-Length (unknown when absent).
/// The bar is ended whether or not the copy succeeds. Returns the number of
/// bytes written, and fails with [`Error::InvalidResponseLength`] when a
/// declared length was not honored.
pub async fn download_with_progress<W>(
    progress: Arc<dyn Progress>,
    response: Response,
    writer: &mut W,
) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let declared = declared_length(&response);
    progress.set_total(declared);
    progress.kickoff();

    let body = ByteCounter::new(Box::pin(response.bytes_stream()), progress.clone());
    let copied = copy_body(body, writer).await;
    progress.end();
    let written = copied?;

    if let Ok(expected) = u64::try_from(declared) {
        if written != expected {
            return Err(Error::InvalidResponseLength {
                expected,
                actual: written,
            });
        }
    }

    debug!("downloaded {} bytes", written);
    Ok(written)
}

async fn copy_body<S, W>(mut body: S, writer: &mut W) -> Result<u64>
where
    S: futures::Stream<Item = reqwest::Result<bytes::Bytes>> + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressView;

    fn response(body: &'static str) -> Response {
        Response::from(http::Response::new(body))
    }

    #[tokio::test]
    async fn test_download_counts_and_writes() {
        let view = Arc::new(ProgressView::hidden());
        let mut out = Vec::new();

        let written = download_with_progress(view.clone(), response("some-installation"), &mut out)
            .await
            .unwrap();

        assert_eq!(written, 17);
        assert_eq!(out, b"some-installation");
        assert_eq!(view.total(), 17);
        assert_eq!(view.current(), 17);
        assert!(!view.is_running());
    }
}
