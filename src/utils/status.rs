//! Status guard for Ops Manager responses.
//!
//! Collaborators check the status of every response they receive. On a
//! mismatch the whole response is dumped into the error so the operator can
//! see what the server actually said.
//!
//! # Examples
//!
//! ```rust,no_run
//! use opsman::utils::validate_status_ok;
//!
//! # async fn example(response: reqwest::Response) -> Result<(), opsman::Error> {
//! let response = validate_status_ok(response).await?;
//! let body = response.text().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use reqwest::{Response, StatusCode};
use std::fmt::Write;

/// Return `response` untouched when its status is `expected`.
///
/// Otherwise consume it and fail with [`Error::UnexpectedResponse`].
pub async fn validate_status(response: Response, expected: StatusCode) -> Result<Response> {
    if response.status() == expected {
        return Ok(response);
    }
    Err(Error::UnexpectedResponse(dump_response(response).await))
}

/// [`validate_status`] expecting `200 OK`.
pub async fn validate_status_ok(response: Response) -> Result<Response> {
    validate_status(response, StatusCode::OK).await
}

/// Render the status line, headers and body of `response`.
pub async fn dump_response(response: Response) -> String {
    let mut out = format!("{:?} {}\r\n", response.version(), response.status());
    for (name, value) in response.headers() {
        let _ = write!(out, "{}: {}\r\n", name, String::from_utf8_lossy(value.as_bytes()));
    }
    out.push_str("\r\n");
    match response.text().await {
        Ok(body) => out.push_str(&body),
        Err(e) => {
            let _ = write!(out, "<could not read body: {}>", e);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_matching_status_passes_through() {
        let response = Response::from(http::Response::new("{}"));
        let response = validate_status_ok(response).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_mismatch_dumps_response() {
        let response = Response::from(
            http::Response::builder()
                .status(418)
                .header("X-Thing", "kettle")
                .body("short and stout")
                .unwrap(),
        );

        let err = validate_status_ok(response).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("request failed: unexpected response"));
        assert!(message.contains("418 I'm a teapot"));
        assert!(message.contains("x-thing: kettle"));
        assert!(message.contains("short and stout"));
    }
}
