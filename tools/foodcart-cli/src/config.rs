//! CLI configuration.

use anyhow::{Context, Result};
use foodcart_commerce::catalog::Menu;
use foodcart_commerce::money::DEFAULT_CURRENCY_SYMBOL;
use foodcart_notify::{TelegramConfig, TimeoutConfig, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `telegram.bot_token`.
pub const BOT_TOKEN_ENV: &str = "FOODCART_BOT_TOKEN";
/// Environment variable overriding `telegram.chat_id`.
pub const CHAT_ID_ENV: &str = "FOODCART_CHAT_ID";

/// File names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["foodcart.toml", ".foodcart.toml", "foodcart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront settings.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Order delivery settings.
    #[serde(default)]
    pub telegram: TelegramSection,

    /// The menu offered in the storefront.
    #[serde(default)]
    pub menu: Menu,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            Self::parse_toml(&content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Parse a TOML document.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The built-in demo shop used when no config file is found.
    pub fn sample() -> Result<Self> {
        Self::parse_toml(&generate_default_config("foodcart")).context("Built-in sample menu is invalid")
    }

    /// Apply `FOODCART_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup; blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = present(BOT_TOKEN_ENV) {
            self.telegram.bot_token = Some(token);
        }
        if let Some(chat_id) = present(CHAT_ID_ENV) {
            self.telegram.chat_id = Some(chat_id);
        }
    }

    /// Copy safe to print: the bot token is masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.telegram.bot_token.is_some() {
            config.telegram.bot_token = Some("<redacted>".to_string());
        }
        config
    }
}

/// Storefront settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Shop name shown in headers.
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Symbol printed after amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_shop_name() -> String {
    "foodcart".to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Telegram bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSection {
    /// Bot API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bot token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Chat receiving the orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for TelegramSection {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            bot_token: None,
            chat_id: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl TelegramSection {
    /// Check if both token and chat are set.
    pub fn is_configured(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        set(&self.bot_token) && set(&self.chat_id)
    }

    /// Submitter config, if the section is complete.
    pub fn to_submitter_config(&self) -> Option<TelegramConfig> {
        if !self.is_configured() {
            return None;
        }
        let token = self.bot_token.clone()?;
        let chat_id = self.chat_id.clone()?;
        Some(
            TelegramConfig::new(token, chat_id)
                .with_api_base(self.api_base.clone())
                .with_timeout(TimeoutConfig::from_millis(self.timeout_ms)),
        )
    }
}

/// Generate a default foodcart.toml with a demo menu.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# foodcart storefront configuration

[shop]
name = "{name}"
currency_symbol = "₽"

[telegram]
api_base = "https://api.telegram.org"
timeout_ms = 10000
# Or set FOODCART_BOT_TOKEN / FOODCART_CHAT_ID.
# bot_token = "123456:ABC-DEF"
# chat_id = "-1001234567890"

[[menu.items]]
id = "margherita"
name = "Пицца Маргарита"
description = "Томатный соус, моцарелла, базилик"
price = 450
image = "images/margherita.jpg"

[[menu.items.add_ons]]
name = "Сыр"
composition = "моцарелла"
price = 60

[[menu.items.add_ons]]
name = "Халапеньо"
composition = "острый перец"
price = 40

[[menu.items]]
id = "burger"
name = "Бургер"
description = "Говяжья котлета, чеддер, соус"
price = 320
image = "images/burger.jpg"

[[menu.items.add_ons]]
name = "Бекон"
composition = "свинина"
price = 70

[[menu.items]]
id = "borscht"
name = "Борщ"
description = "Со сметаной и чесночной пампушкой"
price = 280
image = "images/borscht.jpg"

[[menu.items]]
id = "mors"
name = "Морс"
description = "Клюквенный, 0.5 л"
price = 150
image = "images/mors.jpg"
"#,
        name = name
    )
}
