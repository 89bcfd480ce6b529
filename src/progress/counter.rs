//! Pass-through stream that reports the bytes it yields.

use super::Progress;

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

/// Wraps a chunked byte stream and adds the length of every chunk to a
/// [`Progress`] before handing it on.
///
/// Errors and end-of-stream are forwarded untouched and never move the counter.
pub struct ByteCounter<S> {
    inner: S,
    progress: Arc<dyn Progress>,
}

impl<S> ByteCounter<S> {
    /// Attach `inner` to `progress`.
    pub fn new(inner: S, progress: Arc<dyn Progress>) -> Self {
        Self { inner, progress }
    }

    /// Give back the wrapped stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, E> Stream for ByteCounter<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let item = ready!(Pin::new(&mut this.inner).poll_next(cx));
        if let Some(Ok(chunk)) = &item {
            this.progress.add(chunk.len() as u64);
        }
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
