//! Stemcell uploads and assignments.

use super::client::decode;
use super::{Api, UploadInput};
use crate::error::Result;
use crate::http::Request;
use crate::utils::validate_status_ok;

use reqwest::Method;
use serde::{Deserialize, Serialize};

const STEMCELLS: &str = "/api/v0/stemcells";
const STEMCELL_ASSIGNMENTS: &str = "/api/v0/stemcell_assignments";

/// Stemcell assignments for every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStemcells {
    pub products: Vec<ProductStemcell>,
}

/// The stemcell assignment of one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStemcell {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub guid: String,
    #[serde(rename = "identifier", default, skip_serializing_if = "String::is_empty")]
    pub product_name: String,
    #[serde(
        rename = "is_staged_for_deletion",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub staged_for_deletion: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub staged_stemcell_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub required_stemcell_version: String,
    #[serde(
        rename = "available_stemcell_versions",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub available_versions: Vec<String>,
}

impl Api {
    /// Upload a stemcell, usually a multipart form built with
    /// [`FormContent`](crate::utils::FormContent).
    pub async fn upload_stemcell(&self, input: UploadInput) -> Result<()> {
        let request = input.into_request(Method::POST, STEMCELLS)?;
        let response = self.send_with_progress("stemcells", request).await?;
        validate_status_ok(response).await?;
        Ok(())
    }

    /// Current stemcell assignments.
    pub async fn list_stemcells(&self) -> Result<ProductStemcells> {
        let request = Request::new(Method::GET, STEMCELL_ASSIGNMENTS);
        let response = self.send("stemcell_assignments", request).await?;
        let response = validate_status_ok(response).await?;
        decode(response).await
    }

    /// Change stemcell assignments.
    pub async fn assign_stemcell(&self, input: &ProductStemcells) -> Result<()> {
        let request = Request::new(Method::PATCH, STEMCELL_ASSIGNMENTS).json(input)?;
        let response = self.send("stemcell_assignments", request).await?;
        validate_status_ok(response).await?;
        Ok(())
    }
}
