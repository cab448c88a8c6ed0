//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use supermas_commerce::checkout::{OrderSubmitter, SimulatedSubmitter};
use supermas_commerce::storefront::Storefront;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::journal::JournalSubmitter;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let path = match config_path {
            Some(path) => Some(resolve_path(&cwd, path)),
            // Try to find config in current directory or parent directories
            None => find_config(&cwd),
        };

        let config = match &path {
            Some(path) => {
                let mut config = CliConfig::load(path)?;
                if let Some(dir) = path.parent() {
                    config.resolve_paths(dir);
                }
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            None => CliConfig::default(),
        };

        Ok(Self {
            config,
            config_path: path,
            output,
            cwd,
        })
    }

    /// Build the storefront described by the configuration.
    pub fn storefront(&self) -> Result<Storefront> {
        Storefront::from_config(&self.config.storefront).context("Failed to set up the storefront")
    }

    /// The submitter orders are placed through.
    pub fn submitter(&self) -> Box<dyn OrderSubmitter> {
        match &self.config.orders.journal {
            Some(path) => Box::new(JournalSubmitter::new(path)),
            None => Box::new(SimulatedSubmitter::new(
                self.config.storefront.checkout.simulated_latency(),
            )),
        }
    }

    /// Human description of where orders go.
    pub fn submitter_label(&self) -> String {
        match &self.config.orders.journal {
            Some(path) => format!("journal {}", path.display()),
            None => "simulated".to_string(),
        }
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
