//! The diagnostic report: what is staged, deployed and available.

use super::Api;
use crate::error::{Error, Result};
use crate::http::Request;
use crate::utils::validate_status_ok;

use reqwest::{Method, StatusCode};
use serde::Deserialize;

const DIAGNOSTIC_REPORT: &str = "/api/v0/diagnostic_report";

/// A product listed in the diagnostic report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiagnosticProduct {
    pub name: String,
    pub version: String,
    pub stemcell: Option<String>,
    pub stemcells: Vec<DiagnosticStemcell>,
}

/// A stemcell known to Ops Manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiagnosticStemcell {
    pub filename: String,
    pub os: String,
    pub version: String,
}

/// The parts of the diagnostic report the client works with, plus the raw
/// report in `full_report`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub infrastructure_type: String,
    pub stemcells: Vec<String>,
    pub staged_products: Vec<DiagnosticProduct>,
    pub deployed_products: Vec<DiagnosticProduct>,
    pub available_stemcells: Vec<DiagnosticStemcell>,
    pub full_report: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReportResponse {
    infrastructure_type: String,
    stemcells: Vec<String>,
    added_products: AddedProducts,
    available_stemcells: Vec<DiagnosticStemcell>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AddedProducts {
    staged: Vec<DiagnosticProduct>,
    deployed: Vec<DiagnosticProduct>,
}

impl Api {
    /// Fetch the diagnostic report.
    ///
    /// Ops Manager answers `500` while it cannot build the report, which is
    /// reported as [`Error::DiagnosticReportUnavailable`].
    pub async fn get_diagnostic_report(&self) -> Result<DiagnosticReport> {
        let request = Request::new(Method::GET, DIAGNOSTIC_REPORT);
        let response = self.send("diagnostic_report", request).await?;
        if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
            return Err(Error::DiagnosticReportUnavailable);
        }
        let response = validate_status_ok(response).await?;

        let body = response.bytes().await?;
        let report: ReportResponse = serde_json::from_slice(&body)?;
        Ok(DiagnosticReport {
            infrastructure_type: report.infrastructure_type,
            stemcells: report.stemcells,
            staged_products: report.added_products.staged,
            deployed_products: report.added_products.deployed,
            available_stemcells: report.available_stemcells,
            full_report: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
