//! Export, import and deletion of the whole installation.

use super::client::decode;
use super::{Api, UploadInput};
use crate::error::{Error, Result};
use crate::http::{download_with_progress, Request};
use crate::utils::validate_status_ok;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::path::Path;
use tokio::fs::File;
use tracing::info;

const INSTALLATION_ASSET_COLLECTION: &str = "/api/v0/installation_asset_collection";
const ENDPOINT: &str = "installation_asset_collection";

#[derive(Debug, Deserialize)]
struct DeleteInstallationResponse {
    install: InstallId,
}

#[derive(Debug, Deserialize)]
struct InstallId {
    id: u64,
}

impl Api {
    /// Download the installation archive to `output`.
    ///
    /// Ops Manager takes a while to prepare the archive; the wait is reported
    /// as elapsed time, then the download itself as a bar. Returns the number
    /// of bytes written.
    pub async fn export_installation(&self, output: impl AsRef<Path>) -> Result<u64> {
        let output = output.as_ref();
        let request = Request::new(Method::GET, INSTALLATION_ASSET_COLLECTION);
        let response = self.send_with_progress(ENDPOINT, request).await?;
        let response = validate_status_ok(response).await?;

        let mut file = File::create(output).await.map_err(|e| {
            Error::Internal(format!("cannot create output file {}: {}", output.display(), e))
        })?;
        let written = download_with_progress(self.progress(), response, &mut file).await?;
        info!("exported installation to {}", output.display());
        Ok(written)
    }

    /// Upload an installation archive.
    pub async fn import_installation(&self, input: UploadInput) -> Result<()> {
        let request = input.into_request(Method::POST, INSTALLATION_ASSET_COLLECTION)?;
        let response = self.send_with_progress(ENDPOINT, request).await?;
        validate_status_ok(response).await?;
        Ok(())
    }

    /// Delete the installation.
    ///
    /// Returns the id of the install deleting it, or `None` when there was
    /// nothing to delete.
    pub async fn delete_installation(&self) -> Result<Option<u64>> {
        let request = Request::new(Method::DELETE, INSTALLATION_ASSET_COLLECTION)
            .json(&serde_json::json!({ "errands": {} }))?;
        let response = self.send(ENDPOINT, request).await?;

        if response.status() == StatusCode::GONE {
            return Ok(None);
        }
        let response = validate_status_ok(response).await?;
        let installation: DeleteInstallationResponse = decode(response).await?;
        Ok(Some(installation.install.id))
    }
}
