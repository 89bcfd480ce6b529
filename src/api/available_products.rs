//! Products uploaded to Ops Manager but not necessarily staged.

use super::client::decode;
use super::{Api, UploadInput};
use crate::error::Result;
use crate::http::Request;
use crate::utils::validate_status_ok;

use reqwest::Method;
use serde::{Deserialize, Serialize};

const AVAILABLE_PRODUCTS: &str = "/api/v0/available_products";
const ENDPOINT: &str = "available_products";

/// A product name and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    #[serde(rename = "product_version")]
    pub version: String,
}

/// Which available products to delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteAvailableProductsInput {
    pub product_name: String,
    pub product_version: String,
    /// Delete every unused product; name and version are then ignored.
    pub delete_all: bool,
}

impl Api {
    /// Upload a product file, usually a multipart form built with
    /// [`FormContent`](crate::utils::FormContent).
    pub async fn upload_available_product(&self, input: UploadInput) -> Result<()> {
        let request = input.into_request(Method::POST, AVAILABLE_PRODUCTS)?;
        let response = self.send_with_progress(ENDPOINT, request).await?;
        validate_status_ok(response).await?;
        Ok(())
    }

    /// Every product uploaded to Ops Manager.
    pub async fn list_available_products(&self) -> Result<Vec<ProductInfo>> {
        let request = Request::new(Method::GET, AVAILABLE_PRODUCTS);
        let response = self.send(ENDPOINT, request).await?;
        let response = validate_status_ok(response).await?;
        decode(response).await
    }

    /// Whether `name` at `version` has been uploaded.
    pub async fn check_product_availability(&self, name: &str, version: &str) -> Result<bool> {
        let products = self.list_available_products().await?;
        Ok(products
            .iter()
            .any(|product| product.name == name && product.version == version))
    }

    /// Delete one available product, or all unused ones.
    pub async fn delete_available_products(
        &self,
        input: &DeleteAvailableProductsInput,
    ) -> Result<()> {
        let path = if input.delete_all {
            AVAILABLE_PRODUCTS.to_string()
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("product_name", &input.product_name)
                .append_pair("version", &input.product_version)
                .finish();
            format!("{}?{}", AVAILABLE_PRODUCTS, query)
        };

        let response = self.send(ENDPOINT, Request::new(Method::DELETE, path)).await?;
        validate_status_ok(response).await?;
        Ok(())
    }
}
