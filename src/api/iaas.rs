//! IaaS configuration through the HTML form pages.
//!
//! These pages predate the JSON API: the edit page is fetched for its CSRF
//! token, then the form is posted back url-encoded with Rails' `_method`
//! override.

use super::Api;
use crate::error::Result;
use crate::http::Request;
use crate::utils::{bool_as_form_value, csrf_token_from_response, validate_status, FormValues};

use reqwest::{Method, StatusCode};

const IAAS_CONFIGURATION: &str = "/infrastructure/iaas_configuration";
const IAAS_CONFIGURATION_EDIT: &str = "/infrastructure/iaas_configuration/edit";

/// AWS settings for the BOSH director.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsIaasConfigurationInput {
    pub access_key: String,
    pub secret_key: String,
    pub vpc_id: String,
    pub security_group_id: String,
    pub key_pair_name: String,
    pub private_key: String,
    pub region: String,
    pub encrypted: bool,
}

impl AwsIaasConfigurationInput {
    fn to_form(&self, token: &str) -> FormValues {
        let mut form = FormValues::new();
        form.set("_method", "put")
            .set("authenticity_token", token)
            .add("iaas_configuration[access_key_id]", &self.access_key)
            .add("iaas_configuration[secret_access_key]", &self.secret_key)
            .add("iaas_configuration[iam_instance_profile]", "")
            .add("iaas_configuration[vpc_id]", &self.vpc_id)
            .add("iaas_configuration[security_group]", &self.security_group_id)
            .add("iaas_configuration[key_pair_name]", &self.key_pair_name)
            .add("iaas_configuration[ssh_private_key]", &self.private_key)
            .add("iaas_configuration[region]", &self.region)
            .add(
                "iaas_configuration[encrypted]",
                bool_as_form_value(self.encrypted),
            );
        form
    }
}

impl Api {
    /// Configure the director for AWS.
    pub async fn configure_aws_iaas(&self, input: &AwsIaasConfigurationInput) -> Result<()> {
        let request = Request::new(Method::GET, IAAS_CONFIGURATION_EDIT);
        let response = self.send("iaas_configuration", request).await?;
        let response = validate_status(response, StatusCode::OK).await?;
        let token = csrf_token_from_response(response).await?;

        let request = Request::new(Method::POST, IAAS_CONFIGURATION).form(&input.to_form(&token));
        let response = self.send("iaas_configuration", request).await?;
        validate_status(response, StatusCode::OK).await?;
        Ok(())
    }
}
