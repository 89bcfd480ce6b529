//! First-time setup of Ops Manager (JSON dialect).

use super::Api;
use crate::error::{Error, Result};
use crate::http::Request;
use crate::utils::{dump_response, validate_status_ok};

use reqwest::header::LOCATION;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;

const WAITING_FOR_AUTH: &str = "Waiting for authentication system to start...";

/// Settings for [`Api::setup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupInput {
    pub identity_provider: String,
    pub admin_user_name: String,
    pub admin_password: String,
    pub admin_password_confirmation: String,
    pub decryption_passphrase: String,
    pub decryption_passphrase_confirmation: String,
    pub eula_accepted: bool,
    pub http_proxy_url: String,
    pub https_proxy_url: String,
    pub no_proxy: String,
}

#[derive(Debug, Serialize)]
struct SetupRequest<'a> {
    setup: SetupFields<'a>,
}

#[derive(Debug, Serialize)]
struct SetupFields<'a> {
    identity_provider: &'a str,
    admin_user_name: &'a str,
    admin_password: &'a str,
    admin_password_confirmation: &'a str,
    decryption_passphrase: &'a str,
    decryption_passphrase_confirmation: &'a str,
    eula_accepted: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    http_proxy: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    https_proxy: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    no_proxy: &'a str,
}

impl<'a> From<&'a SetupInput> for SetupRequest<'a> {
    fn from(input: &'a SetupInput) -> Self {
        Self {
            setup: SetupFields {
                identity_provider: &input.identity_provider,
                admin_user_name: &input.admin_user_name,
                admin_password: &input.admin_password,
                admin_password_confirmation: &input.admin_password_confirmation,
                decryption_passphrase: &input.decryption_passphrase,
                decryption_passphrase_confirmation: &input.decryption_passphrase_confirmation,
                eula_accepted: if input.eula_accepted { "true" } else { "false" },
                http_proxy: &input.http_proxy_url,
                https_proxy: &input.https_proxy_url,
                no_proxy: &input.no_proxy,
            },
        }
    }
}

fn is_empty(value: &&str) -> bool {
    value.is_empty()
}

/// Where Ops Manager is in its boot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Setup has not been run yet.
    Unstarted,
    /// The authentication system is still starting.
    Pending,
    /// Setup is done and authentication is up.
    Complete,
}

impl Api {
    /// Run the first-time setup.
    pub async fn setup(&self, input: &SetupInput) -> Result<()> {
        let request = Request::new(Method::POST, "/api/v0/setup").json(&SetupRequest::from(input))?;
        let response = self.send("setup", request).await?;
        validate_status_ok(response).await?;
        Ok(())
    }

    /// Check the login page to find out whether Ops Manager is ready.
    pub async fn ensure_availability(&self) -> Result<Availability> {
        let request = Request::new(Method::GET, "/login/ensure_availability");
        let response = self.send("ensure_availability", request).await?;

        match response.status() {
            StatusCode::FOUND => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();
                // Relative redirects are resolved against a dummy base.
                let path = Url::parse("http://localhost/")
                    .and_then(|base| base.join(location))
                    .map(|url| url.path().to_string())
                    .map_err(|e| Error::InvalidUrl(format!("could not parse redirect url: {}", e)))?;
                match path.as_str() {
                    "/setup" => Ok(Availability::Unstarted),
                    "/auth/cloudfoundry" => Ok(Availability::Complete),
                    other => Err(Error::Internal(format!(
                        "unexpected redirect location: {}",
                        other
                    ))),
                }
            }
            StatusCode::OK => {
                let body = response.text().await?;
                if body.contains(WAITING_FOR_AUTH) {
                    Ok(Availability::Pending)
                } else {
                    Err(Error::Internal(format!(
                        "received OK with an unexpected body: {}",
                        body
                    )))
                }
            }
            _ => Err(Error::UnexpectedResponse(dump_response(response).await)),
        }
    }
}
