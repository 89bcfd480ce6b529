//! CSRF token scraping for the HTML form pages.

use crate::error::{Error, Result};

use regex::Regex;
use reqwest::Response;
use std::sync::LazyLock;

static CSRF_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta\s+name="csrf-token"\s+content="([^"]*)"\s*/?>"#)
        .expect("csrf pattern is valid")
});

/// Extract the first `<meta name="csrf-token" content="X"/>` value from `html`.
///
/// # Example
///
/// ```rust
/// use opsman::utils::csrf_token;
///
/// let token = csrf_token(r#"<head><meta name="csrf-token" content="a-token"/></head>"#)?;
/// assert_eq!(token, "a-token");
/// # Ok::<(), opsman::Error>(())
/// ```
pub fn csrf_token(html: &str) -> Result<String> {
    CSRF_META
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_string())
        .ok_or(Error::TokenMissing)
}

/// Read the body of `response` and extract its CSRF token.
pub async fn csrf_token_from_response(response: Response) -> Result<String> {
    let html = response.text().await?;
    csrf_token(&html)
}
