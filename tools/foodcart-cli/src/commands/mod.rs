//! CLI command implementations.

pub mod config;
pub mod menu;
pub mod order;

use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Show add-on compositions.
    #[arg(short, long)]
    pub details: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Log the order instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file with a demo menu.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
