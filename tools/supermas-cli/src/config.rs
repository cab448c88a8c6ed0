//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use supermas_commerce::config::StorefrontConfig;

/// File names searched for when `--config` is not given.
pub const CONFIG_NAMES: [&str; 3] = ["supermas.toml", ".supermas.toml", "supermas.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Storefront settings (`store`, `catalog_path`, `[checkout]`).
    #[serde(flatten)]
    pub storefront: StorefrontConfig,

    /// Where placed orders go.
    #[serde(default)]
    pub orders: OrdersConfig,
}

/// Order placement settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrdersConfig {
    /// Append each placed order as a JSON line to this file. Without it,
    /// orders are acknowledged by the simulated submitter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<PathBuf>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Resolve relative paths in the config against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = self.storefront.catalog_path.take() {
            self.storefront.catalog_path = Some(resolve(base, path));
        }
        if let Some(path) = self.orders.journal.take() {
            self.orders.journal = Some(resolve(base, path));
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Generate a default supermas.toml config file.
pub fn generate_default_config() -> String {
    r#"# SuperMas storefront configuration

# Load the menu from a JSON file instead of the built-in one.
# catalog_path = "menu.json"

[checkout]
submit_timeout_ms = 10000
max_retries = 2
backoff_ms = 250
confirmation_display_ms = 2500
simulated_latency_ms = 2500

[orders]
# Append placed orders to a JSON-lines file instead of simulating.
# journal = "orders.jsonl"

# Override the store details.
# [store]
# name = "SuperMas"
# address = "Main Street Abbeyfeale V94E13C"
# phone = "06832360"
#
# [[store.opening_hours]]
# days = "Mon - Fri"
# opens = "12:00"
# closes = "23:00"
"#
    .to_string()
}
