//! Configuration inspection — `relay config show|init|validate`.

use super::super::{Cli, ConfigCommands};
use anyhow::Result;
use console::style;
use relay::config::{ConfigFile, RelayConfig, mask_key};
use relay::output::{OutputFormat, print_field};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ConfigView {
    endpoint: String,
    api_key: Option<String>,
    config_file: Option<String>,
}

pub fn cmd_config(cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    match command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => cmd_show(cli),
        ConfigCommands::Init => cmd_init(),
        ConfigCommands::Validate => cmd_validate(cli),
    }
}

fn resolve(cli: &Cli) -> Result<RelayConfig> {
    RelayConfig::resolve(
        cli.endpoint.as_deref(),
        cli.api_key.as_deref(),
        cli.config.as_deref(),
    )
}

fn cmd_show(cli: &Cli) -> Result<()> {
    let settings = resolve(cli)?;
    let view = ConfigView {
        endpoint: settings.endpoint.clone(),
        api_key: settings.api_key.as_deref().map(mask_key),
        config_file: settings
            .config_path
            .as_ref()
            .map(|p| p.display().to_string()),
    };

    let format = OutputFormat::from_str(&cli.format);
    if !format.is_text() {
        format.print_value(&view);
        return Ok(());
    }

    print_field("Endpoint", &view.endpoint);
    print_field("API key", view.api_key.as_deref().unwrap_or("(not set)"));
    print_field("Config", view.config_file.as_deref().unwrap_or("(none)"));
    Ok(())
}

fn cmd_init() -> Result<()> {
    ConfigFile::init(Path::new("relay.toml"))?;
    println!("{} Created relay.toml", style("✓").green());
    Ok(())
}

fn cmd_validate(cli: &Cli) -> Result<()> {
    let settings = resolve(cli)?;
    match settings.config_path {
        Some(path) => println!("Config file: {} (valid)", path.display()),
        None => println!("No config file found. Using defaults (valid)"),
    }
    if settings.api_key.is_none() {
        println!(
            "{} No API key configured; publish commands will fail",
            style("⚠").yellow()
        );
    }
    Ok(())
}
