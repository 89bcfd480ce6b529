//! The Ops Manager API client.
//!
//! [`Api`] is assembled by [`ApiBuilder`] from an [`ApiConfig`]. Each
//! submodule adds the calls for one area of Ops Manager:
//!
//! - `installation_asset` - Export, import and deletion of the installation
//! - `available_products` - Product uploads and listing
//! - `staged_products` - Staging products
//! - `stemcells` - Stemcell uploads and assignments
//! - `setup` - First-time setup and availability
//! - `iaas` - IaaS configuration through the HTML form pages
//! - `diagnostic_report` - The diagnostic report of staged and deployed state
//! - `info` - The Ops Manager version
//!
//! Uploads and the installation export go through the progress transport,
//! every other call goes straight to the underlying transport.
//!
//! # Examples
//!
//! ## Uploading a Product
//!
//! ```rust,no_run
//! use opsman::api::ApiBuilder;
//! use opsman::utils::FormContent;
//!
//! # async fn example() -> Result<(), opsman::Error> {
//! let api = ApiBuilder::new().target("opsman.example.com").build()?;
//!
//! let mut form = FormContent::new();
//! form.add_file("product[file]", "cf-2.13.0.pivotal").await?;
//! api.upload_available_product(form.finalize().into()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Exporting the Installation
//!
//! ```rust,no_run
//! use opsman::api::ApiBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), opsman::Error> {
//! let api = ApiBuilder::new()
//!     .target("opsman.example.com")
//!     .polling_interval(Duration::from_secs(5))
//!     .build()?;
//! let bytes = api.export_installation("installation.zip").await?;
//! println!("wrote {} bytes", bytes);
//! # Ok(())
//! # }
//! ```

pub mod available_products;
pub mod builder;
pub(crate) mod client;
pub mod config;
pub mod diagnostic_report;
pub mod iaas;
pub mod info;
pub mod installation_asset;
pub mod setup;
pub mod staged_products;
pub mod stemcells;

pub use available_products::{DeleteAvailableProductsInput, ProductInfo};
pub use builder::ApiBuilder;
pub use client::{Api, UploadInput};
pub use config::ApiConfig;
pub use diagnostic_report::{DiagnosticProduct, DiagnosticReport, DiagnosticStemcell};
pub use iaas::AwsIaasConfigurationInput;
pub use info::Info;
pub use setup::{Availability, SetupInput};
pub use staged_products::StagedProduct;
pub use stemcells::{ProductStemcell, ProductStemcells};
