//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde::Serialize;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = ctx.config.redacted();

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(built-in sample)"),
    }

    ctx.output.info("[shop]");
    ctx.output.kv("name", &config.shop.name);
    ctx.output.kv("currency_symbol", &config.shop.currency_symbol);

    ctx.output.info("[telegram]");
    ctx.output.kv("api_base", &config.telegram.api_base);
    ctx.output.kv(
        "bot_token",
        config.telegram.bot_token.as_deref().unwrap_or("(not set)"),
    );
    ctx.output.kv(
        "chat_id",
        config.telegram.chat_id.as_deref().unwrap_or("(not set)"),
    );
    ctx.output.kv("timeout_ms", &config.telegram.timeout_ms.to_string());

    ctx.output.info(&format!("[menu] {} item(s)", config.menu.len()));
    for item in &config.menu.items {
        ctx.output.list_item(&format!(
            "{} ({}) {}",
            item.name,
            item.id,
            ctx.output.money(item.price)
        ));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.default_config_path();

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = ctx
        .cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("foodcart")
        .to_string();

    fs::write(&config_path, generate_default_config(&name))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    ctx.output
        .info("Set FOODCART_BOT_TOKEN and FOODCART_CHAT_ID to deliver orders to Telegram.");

    Ok(())
}

/// Problems found in a configuration.
#[derive(Debug, Default, Serialize)]
pub struct ConfigReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Fails when there is at least one error; warnings alone pass.
    pub fn into_result(self) -> Result<Self> {
        if !self.errors.is_empty() {
            bail!("Configuration has {} error(s)", self.errors.len());
        }
        Ok(self)
    }
}

/// Check a configuration for problems.
pub fn check_config(config: &CliConfig) -> ConfigReport {
    let mut report = ConfigReport::default();

    if config.shop.name.trim().is_empty() {
        report.errors.push("shop.name is required".to_string());
    }
    if config.shop.currency_symbol.trim().is_empty() {
        report
            .warnings
            .push("shop.currency_symbol is empty; amounts will print without a unit".to_string());
    }

    if config.menu.is_empty() {
        report.errors.push("menu has no items".to_string());
    }
    for id in config.menu.duplicate_ids() {
        report.errors.push(format!("menu item id '{}' is used more than once", id));
    }
    for (i, item) in config.menu.items.iter().enumerate() {
        if item.name.trim().is_empty() {
            report.errors.push(format!("menu.items[{}].name is required", i));
        }
        for (j, add_on) in item.add_ons.iter().enumerate() {
            if add_on.name.trim().is_empty() {
                report
                    .errors
                    .push(format!("menu.items[{}].add_ons[{}].name is required", i, j));
            }
        }
    }

    if !config.telegram.is_configured() {
        report.warnings.push(
            "telegram.bot_token or telegram.chat_id is not set; orders will only be logged"
                .to_string(),
        );
    }
    if !config.telegram.api_base.starts_with("http://")
        && !config.telegram.api_base.starts_with("https://")
    {
        report
            .errors
            .push(format!("telegram.api_base '{}' is not an http(s) URL", config.telegram.api_base));
    }
    if config.telegram.timeout_ms == 0 {
        report.errors.push("telegram.timeout_ms must be greater than 0".to_string());
    }

    report
}

fn validate_config(ctx: &Context) -> Result<()> {
    let report = check_config(&ctx.config);

    // The report is the whole JSON answer; problems are not repeated on stderr.
    if ctx.output.is_json() {
        ctx.output.json(&report);
        return report.into_result().map(|_| ());
    }

    ctx.output.header("Validating configuration");

    if report.is_clean() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &report.errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &report.warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    report.into_result()?;
    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
