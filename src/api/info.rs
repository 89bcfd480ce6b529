//! Ops Manager version information.

use super::client::decode;
use super::Api;
use crate::error::{Error, Result};
use crate::http::Request;
use crate::utils::validate_status_ok;

use reqwest::Method;
use serde::Deserialize;

const INFO: &str = "/api/v0/info";

/// What `/api/v0/info` reports about the running Ops Manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Info {
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    info: Info,
}

impl Info {
    /// Whether the version is at least `major.minor`.
    ///
    /// Versions look like `2.5-build.33` or `2.5.0-build.33`; anything after
    /// the first `-` and past the minor component is ignored.
    pub fn version_at_least(&self, major: u32, minor: u32) -> Result<bool> {
        let invalid = || Error::InvalidVersion(self.version.clone());

        let release = self.version.split('-').next().unwrap_or_default();
        let mut parts = release.split('.');
        let found_major: u32 = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;
        let found_minor: u32 = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;

        Ok((found_major, found_minor) >= (major, minor))
    }
}

impl Api {
    /// Fetch the Ops Manager version information.
    pub async fn info(&self) -> Result<Info> {
        let request = Request::new(Method::GET, INFO);
        let response = self.send("info", request).await?;
        let response = validate_status_ok(response).await?;
        let body: InfoResponse = decode(response).await?;
        Ok(body.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_least_2_2(version: &str) -> Result<bool> {
        Info {
            version: version.to_string(),
        }
        .version_at_least(2, 2)
    }

    #[test]
    fn test_version_at_least() {
        let cases = [
            ("1.2-build10", false),
            ("2.2-build3", true),
            ("1.9-build1", false),
            ("1.12-build1", false),
            ("2.0-build1", false),
            ("2.3-build33", true),
            ("2.1.0-build2", false),
            ("2.2.2-build2", true),
            ("2.5.0-build33", true),
            ("2.5.0", true),
            ("3.0-build1", true),
        ];
        for (version, expected) in cases {
            assert_eq!(at_least_2_2(version).unwrap(), expected, "{}", version);
        }
    }

    #[test]
    fn test_invalid_versions() {
        for version in ["", "xxx.1.0", "1.xxx.0", "2"] {
            let err = at_least_2_2(version).unwrap_err();
            assert_eq!(err.to_string(), format!("invalid version: '{}'", version));
        }
    }
}
