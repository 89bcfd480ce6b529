//! Content length helpers.
//!
//! The progress machinery works with signed lengths: a negative value means
//! the size is unknown and no bar is drawn.

use reqwest::Response;

/// Declared body length of a response, or `-1` when it is not known.
///
/// # Example
///
/// ```rust,no_run
/// use opsman::utils::declared_length;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let response = reqwest::get("https://opsman.example.com/api/v0/info").await?;
/// let length = declared_length(&response);
/// # Ok(())
/// # }
/// ```
pub fn declared_length(response: &Response) -> i64 {
    response
        .content_length()
        .and_then(|len| i64::try_from(len).ok())
        .unwrap_or(-1)
}
