//! opsman is a client library for the Ops Manager HTTP API, built around a
//! transport that reports progress on long-running requests.
//!
//! Product, stemcell and installation uploads can take minutes to send and
//! minutes more for the server to process. Requests sent through the
//! [`ProgressTransport`](http::ProgressTransport) draw a bar while the body is
//! being sent, then a live `"<n>s elapsed, waiting for response from Ops
//! Manager..."` line until the response arrives.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use opsman::{api::ApiBuilder, utils::FormContent, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let api = ApiBuilder::new().target("opsman.example.com").build()?;
//!
//! let mut form = FormContent::new();
//! form.add_file("stemcell[file]", "bosh-stemcell-621.0-aws.tgz").await?;
//! form.add_field("stemcell[floating]", "true");
//! api.upload_stemcell(form.finalize().into()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`api`] - The `Api` client, its builder and the Ops Manager calls
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - Transports, the request envelope and download streaming
//! - [`progress`] - Byte counting, progress bars and the live writer
//! - [`utils`] - Status guard, CSRF scraping and form encodings

pub mod api;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use api::{Api, ApiBuilder};
pub use error::{Error, Result};
pub use http::{HttpClientConfig, HttpTransport, ProgressTransport, Request, Transport};
pub use progress::{LiveOutput, LiveWriter, Progress, ProgressBarOpts, ProgressView};
