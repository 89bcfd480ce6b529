//! Staging products for the next deploy.

use super::client::decode;
use super::Api;
use crate::error::{Error, Result};
use crate::http::Request;
use crate::utils::validate_status_ok;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

const STAGED_PRODUCTS: &str = "/api/v0/staged/products";
const DEPLOYED_PRODUCTS: &str = "/api/v0/deployed/products";

/// A product in the staged or deployed installation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StagedProduct {
    pub guid: String,
    #[serde(rename = "type")]
    pub product_type: String,
}

#[derive(Debug, Serialize)]
struct StageProductRequest<'a> {
    name: &'a str,
    product_version: &'a str,
}

#[derive(Debug, Serialize)]
struct UpgradeRequest<'a> {
    to_version: &'a str,
}

impl Api {
    /// Stage `name` at `version`.
    ///
    /// The product must be available. A product that is already deployed is
    /// upgraded in place; otherwise it is added to the staged installation.
    pub async fn stage_product(&self, name: &str, version: &str) -> Result<()> {
        if !self.check_product_availability(name, version).await? {
            return Err(Error::ProductNotFound {
                name: name.to_string(),
                version: version.to_string(),
            });
        }

        let request = Request::new(Method::GET, DEPLOYED_PRODUCTS);
        let response = self.send("deployed_products", request).await?;
        let response = validate_status_ok(response).await?;
        let deployed: Vec<StagedProduct> = decode(response).await?;

        let request = match deployed.iter().find(|product| product.product_type == name) {
            Some(product) => {
                debug!("upgrading deployed product {} to {}", product.guid, version);
                Request::new(Method::PUT, format!("{}/{}", STAGED_PRODUCTS, product.guid))
                    .json(&UpgradeRequest {
                        to_version: version,
                    })?
            }
            None => Request::new(Method::POST, STAGED_PRODUCTS).json(&StageProductRequest {
                name,
                product_version: version,
            })?,
        };

        let response = self.send("staged_products", request).await?;
        validate_status_ok(response).await?;
        Ok(())
    }

    /// Products in the staged installation.
    pub async fn list_staged_products(&self) -> Result<Vec<StagedProduct>> {
        let request = Request::new(Method::GET, STAGED_PRODUCTS);
        let response = self.send("staged_products", request).await?;
        let response = validate_status_ok(response).await?;
        decode(response).await
    }
}
