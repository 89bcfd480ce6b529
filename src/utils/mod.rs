//! Shared utility functions.
//!
//! Helpers used by the API services on top of the transports: response
//! status checks, CSRF token scraping, form encodings and content lengths.
//!
//! # Overview
//!
//! - [`content_length`] - Declared lengths of responses
//! - [`status`] - The status guard dumping unexpected responses
//! - [`csrf`] - CSRF token extraction from HTML pages
//! - [`form`] - Url-encoded forms
//! - [`multipart`] - Streaming multipart forms with an exact length
//!
//! # Examples
//!
//! ## Guarding a Response
//!
//! ```rust,no_run
//! use opsman::utils::validate_status;
//! use reqwest::StatusCode;
//!
//! # async fn example(response: reqwest::Response) -> Result<(), opsman::Error> {
//! let response = validate_status(response, StatusCode::OK).await?;
//! # Ok(())
//! # }
//! ```

pub mod content_length;
pub mod csrf;
pub mod form;
pub mod multipart;
pub mod status;

pub use content_length::declared_length;
pub use csrf::{csrf_token, csrf_token_from_response};
pub use form::{bool_as_form_value, FormValues};
pub use multipart::{ContentSubmission, FormContent};
pub use status::{dump_response, validate_status, validate_status_ok};
