//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the config was loaded from; `None` means the built-in sample.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::sample()?, None),
            },
        };
        config.apply_env_overrides();
        debug!(
            path = ?config_path,
            menu_items = config.menu.len(),
            telegram = config.telegram.is_configured(),
            "config loaded"
        );

        let output = output.with_currency_symbol(config.shop.currency_symbol.clone());
        match &config_path {
            Some(path) => output.debug(&format!("Using config {}", path.display())),
            None => output.debug("No config file found, using the built-in sample menu"),
        }

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    ///
    /// A file that exists but fails to parse is an error rather than being
    /// skipped.
    fn find_config(start: &Path) -> Result<Option<(CliConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    let path = candidate.to_string_lossy().into_owned();
                    return Ok(Some((CliConfig::load(&path)?, candidate)));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Where `config init` writes a new file.
    pub fn default_config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_FILE_NAMES[0])
    }
}
