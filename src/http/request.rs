//! Request envelope handed to a [`Transport`](super::Transport).
//!
//! A [`Request`] carries a method, a path relative to the Ops Manager target,
//! headers and an optional streaming [`Body`] whose declared length is kept
//! next to it.
//!
//! # Examples
//!
//! ```rust
//! use opsman::http::{Body, Request};
//! use reqwest::Method;
//!
//! let request = Request::new(Method::POST, "/api/v0/available_products")
//!     .body(Body::from_bytes("some content"), 12);
//! assert_eq!(request.content_length(), 12);
//! ```

use crate::error::Result;
use crate::utils::form::FormValues;

use bytes::Bytes;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Size of the chunks read from files and other readers.
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

/// A streaming request body.
pub struct Body {
    stream: BoxStream<'static, io::Result<Bytes>>,
}

impl Body {
    /// A body yielding `bytes` in one chunk.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self::from_stream(stream::once(async move { Ok(bytes) }))
    }

    /// A body yielding whatever `stream` yields.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            stream: stream.boxed(),
        }
    }

    /// A body reading `reader` to its end in chunks of [`READ_CHUNK_SIZE`].
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let stream = stream::try_unfold(reader, |mut reader| async move {
            let mut buf = vec![0u8; READ_CHUNK_SIZE];
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                return Ok(None);
            }
            buf.truncate(n);
            Ok(Some((Bytes::from(buf), reader)))
        });
        Self::from_stream(stream)
    }

    /// Consume the body into its underlying stream.
    pub fn into_stream(self) -> BoxStream<'static, io::Result<Bytes>> {
        self.stream
    }
}

impl Stream for Body {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.as_mut().poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

/// A request to an Ops Manager endpoint.
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Body>,
    content_length: i64,
}

impl Request {
    /// Create a request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            content_length: 0,
        }
    }

    /// Add a header, replacing any previous value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a streaming body of `content_length` bytes.
    ///
    /// A negative length means unknown; the body is then sent chunked.
    pub fn body(mut self, body: Body, content_length: i64) -> Self {
        self.body = Some(body);
        self.content_length = content_length;
        self
    }

    /// Attach an in-memory body.
    pub fn bytes(self, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len() as i64;
        self.body(Body::from_bytes(bytes), len)
    }

    /// Attach `value` as a JSON body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let payload = serde_json::to_vec(value)?;
        Ok(self
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .bytes(payload))
    }

    /// Attach `form` as an url-encoded body.
    pub fn form(self, form: &FormValues) -> Self {
        self.header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        )
        .bytes(form.encode())
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path (and query) relative to the target.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Declared body length, `0` without a body and negative when unknown.
    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    /// Whether a body is attached.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Detach the body, keeping the declared length.
    pub fn take_body(&mut self) -> Option<Body> {
        self.body.take()
    }

    /// Replace the body, keeping the declared length.
    pub fn set_body(&mut self, body: Body) {
        self.body = Some(body);
    }

    /// Split the request into method, path, headers, body and declared length.
    pub fn into_parts(self) -> (Method, String, HeaderMap, Option<Body>, i64) {
        (
            self.method,
            self.path,
            self.headers,
            self.body,
            self.content_length,
        )
    }
}
