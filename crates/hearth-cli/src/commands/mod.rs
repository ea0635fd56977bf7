//! CLI command implementations.

pub mod backfill;
pub mod setup;
pub mod status;
pub mod sync;

use std::path::Path;

use anyhow::{ensure, Context, Result};
use hearth_core::{ApiClient, AuthClient};

use crate::config::Config;

/// Refresh the token pair, persist it, and build an authenticated client.
///
/// Every run rotates tokens first; the refresh token in config is only
/// valid once.
pub(crate) async fn authenticated_client(
    config: &mut Config,
    config_path: &Path,
) -> Result<ApiClient> {
    ensure!(
        config.is_authorized(),
        "no credentials found, run `hearth setup` first"
    );

    let auth = AuthClient::new(config.api_key.clone());
    let tokens = auth
        .refresh_tokens(&config.refresh_token)
        .await
        .context("token refresh failed; re-run `hearth setup` if this persists")?;
    config.access_token = tokens.access_token;
    config.refresh_token = tokens.refresh_token;
    config.save(config_path)?;

    Ok(ApiClient::new(config.access_token.clone()))
}

/// Fetch the registered thermostat list and persist it in config.
pub(crate) async fn refresh_thermostats(
    client: &ApiClient,
    config: &mut Config,
    config_path: &Path,
) -> Result<Vec<String>> {
    use hearth_core::ReportSource;

    let ids = client.list_thermostats().await?;
    config.thermostat_ids = ids.clone();
    config.save(config_path)?;
    Ok(ids)
}
