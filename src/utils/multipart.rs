//! Streaming `multipart/form-data` bodies with an exact length.
//!
//! Ops Manager wants a Content-Length on product, stemcell and installation
//! uploads, and those files are far too large to buffer. [`FormContent`]
//! computes the final length up front from file metadata and streams each
//! file from disk only when the body is polled.
//!
//! # Examples
//!
//! ```rust,no_run
//! use opsman::utils::FormContent;
//!
//! # async fn example() -> Result<(), opsman::Error> {
//! let mut form = FormContent::new();
//! form.add_file("product[file]", "/tmp/product.pivotal").await?;
//! form.add_field("product[floating]", "true");
//! let submission = form.finalize();
//! println!("{} bytes as {}", submission.content_length, submission.content_type);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::http::Body;

use bytes::Bytes;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tokio::fs::File;

const CRLF: &str = "\r\n";

/// A finished form, ready to be sent.
#[derive(Debug)]
pub struct ContentSubmission {
    pub body: Body,
    pub content_type: String,
    pub content_length: i64,
}

#[derive(Debug)]
enum Segment {
    Bytes(Bytes),
    File(PathBuf),
}

#[derive(Debug)]
struct FilePart {
    header: String,
    path: PathBuf,
    len: u64,
}

/// A `multipart/form-data` builder.
///
/// Files are written before fields regardless of insertion order.
#[derive(Debug)]
pub struct FormContent {
    boundary: String,
    files: Vec<FilePart>,
    fields: Vec<String>,
}

impl FormContent {
    /// Creates an empty form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(format!("{:032x}", rand::random::<u128>()))
    }

    /// Creates an empty form using `boundary`.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            files: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// The part boundary.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `multipart/form-data` content type carrying the boundary.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Add a plain field.
    pub fn add_field(&mut self, key: &str, value: &str) -> &mut Self {
        let part = format!(
            "--{}{CRLF}Content-Disposition: form-data; name=\"{}\"{CRLF}{CRLF}{}{CRLF}",
            self.boundary,
            escape_quotes(key),
            value
        );
        self.fields.push(part);
        self
    }

    /// Add the file at `path` under `key`.
    ///
    /// The file must exist and must not be empty.
    pub async fn add_file(&mut self, key: &str, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if metadata.len() == 0 {
            return Err(Error::EmptyFile(path.to_path_buf()));
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let header = format!(
            "--{}{CRLF}Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}Content-Type: application/octet-stream{CRLF}{CRLF}",
            self.boundary,
            escape_quotes(key),
            escape_quotes(&filename)
        );
        self.files.push(FilePart {
            header,
            path: path.to_path_buf(),
            len: metadata.len(),
        });
        Ok(self)
    }

    /// Exact number of bytes the finished body will yield.
    pub fn content_length(&self) -> i64 {
        let files: u64 = self
            .files
            .iter()
            .map(|part| part.header.len() as u64 + part.len + CRLF.len() as u64)
            .sum();
        let fields: u64 = self.fields.iter().map(|part| part.len() as u64).sum();
        let closing = self.closing().len() as u64;
        i64::try_from(files + fields + closing).unwrap_or(i64::MAX)
    }

    /// Seal the form into a streaming body.
    pub fn finalize(self) -> ContentSubmission {
        let content_type = self.content_type();
        let content_length = self.content_length();
        let closing = self.closing();

        let mut segments = Vec::with_capacity(self.files.len() * 3 + self.fields.len() + 1);
        for part in self.files {
            segments.push(Segment::Bytes(Bytes::from(part.header)));
            segments.push(Segment::File(part.path));
            segments.push(Segment::Bytes(Bytes::from_static(CRLF.as_bytes())));
        }
        for field in self.fields {
            segments.push(Segment::Bytes(Bytes::from(field)));
        }
        segments.push(Segment::Bytes(Bytes::from(closing)));

        let stream = stream::iter(segments)
            .map(|segment| match segment {
                Segment::Bytes(bytes) => stream::once(async move { Ok(bytes) }).boxed(),
                Segment::File(path) => stream::once(File::open(path))
                    .map_ok(Body::from_reader)
                    .try_flatten()
                    .boxed(),
            })
            .flatten();

        ContentSubmission {
            body: Body::from_stream(stream),
            content_type,
            content_length,
        }
    }

    fn closing(&self) -> String {
        format!("--{}--{CRLF}", self.boundary)
    }
}

impl Default for FormContent {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
