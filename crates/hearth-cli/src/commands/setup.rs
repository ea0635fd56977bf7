//! Setup command - pin authorization and credential storage.

use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};
use hearth_core::AuthClient;

use crate::cli::SetupArgs;
use crate::config::Config;

/// Login page the user registers the pin on.
const LOGIN_URL: &str = "https://www.ecobee.com/home/ecobeeLogin.jsp";

/// Execute the setup command.
pub async fn cmd_setup(args: SetupArgs, config_path: &Path) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    if config.is_authorized() && !args.force {
        let redo = Confirm::new()
            .with_prompt("Credentials already exist, reset the application pin?")
            .default(false)
            .interact()?;
        if !redo {
            return Ok(());
        }
    }

    if config.api_key.is_empty() {
        config.api_key = Input::new()
            .with_prompt("API key of your registered application")
            .interact_text()
            .context("api key is required")?;
    }

    // A new pin invalidates any previous tokens.
    config.access_token.clear();
    config.refresh_token.clear();

    let auth = AuthClient::new(config.api_key.clone());
    let authorization = auth.authorize().await?;
    config.pin = authorization.pin.clone();
    config.auth_code = authorization.code.clone();
    config.save(config_path)?;

    println!("\nRegister this pin under your account:");
    println!("  Login -> Menu -> My Apps -> Add Application -> Enter pin -> Validate -> Add Application");
    println!("\n  Pin: {}", authorization.pin);
    if open::that(LOGIN_URL).is_err() {
        println!("\nOpen {LOGIN_URL} in your browser to log in");
    }

    let _: String = Input::new()
        .with_prompt("Press enter when the pin is registered")
        .allow_empty(true)
        .interact_text()?;

    let tokens = auth
        .request_tokens(&config.auth_code)
        .await
        .context("token exchange failed, was the pin registered?")?;
    config.access_token = tokens.access_token;
    config.refresh_token = tokens.refresh_token;
    config.save(config_path)?;

    let location: String = Input::new()
        .with_prompt("File path for the history CSV (empty for the platform default)")
        .allow_empty(true)
        .interact_text()?;
    if !location.is_empty() {
        config.csv_location = Some(location.into());
    }
    config.save(config_path)?;

    println!(
        "\nFinished! Config saved to {}. Run `hearth sync` to download your data",
        config_path.display()
    );
    Ok(())
}
