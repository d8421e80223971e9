pub mod link;
pub mod migrate;
pub mod promote;

use anyhow::Context;
use relay_core::api::ApiClient;
use relay_core::config::{self, Credentials};

/// Build the control-plane client from the operator's configuration.
pub(crate) fn api_client() -> anyhow::Result<ApiClient> {
    let creds = Credentials::load().context("failed to load credentials")?;
    Ok(ApiClient::new(config::endpoint(), creds.deploy_key))
}
