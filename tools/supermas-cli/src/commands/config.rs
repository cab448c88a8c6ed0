//! Configuration management commands.

use anyhow::{bail, Result};

use supermas_commerce::catalog::Catalog;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let storefront = &ctx.config.storefront;
    match &storefront.catalog_path {
        Some(path) => ctx.output.kv("catalog_path", &path.display().to_string()),
        None => ctx.output.kv("catalog_path", "(built-in menu)"),
    }

    // Checkout section
    let checkout = &storefront.checkout;
    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output
        .kv("submit_timeout_ms", &checkout.submit_timeout_ms.to_string());
    ctx.output.kv("max_retries", &checkout.max_retries.to_string());
    ctx.output.kv("backoff_ms", &checkout.backoff_ms.to_string());
    ctx.output.kv(
        "confirmation_display_ms",
        &checkout.confirmation_display_ms.to_string(),
    );
    ctx.output
        .kv("simulated_latency_ms", &checkout.simulated_latency_ms.to_string());

    // Orders section
    ctx.output.info("");
    ctx.output.info("[orders]");
    ctx.output.kv("submitter", &ctx.submitter_label());

    if let Some(store) = &storefront.store {
        ctx.output.info("");
        ctx.output.info("[store]");
        ctx.output.kv("name", &store.name);
        ctx.output.kv("address", &store.address);
        ctx.output.kv("phone", &store.phone);
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let report = validate(&ctx.config);

    if report.errors.is_empty() && report.warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &report.errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &report.warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !report.errors.is_empty() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

#[derive(Debug, Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn validate(config: &CliConfig) -> Report {
    let mut report = Report::default();
    let checkout = &config.storefront.checkout;

    if checkout.submit_timeout_ms == 0 {
        report
            .errors
            .push("checkout.submit_timeout_ms must be greater than 0".to_string());
    } else if checkout.simulated_latency_ms >= checkout.submit_timeout_ms
        && config.orders.journal.is_none()
    {
        report.warnings.push(format!(
            "checkout.simulated_latency_ms ({}) is not below submit_timeout_ms ({}); simulated orders will time out",
            checkout.simulated_latency_ms, checkout.submit_timeout_ms
        ));
    }

    if checkout.max_retries > 10 {
        report.warnings.push(format!(
            "checkout.max_retries is {}; customers will wait a long time on failures",
            checkout.max_retries
        ));
    }

    if let Some(path) = &config.storefront.catalog_path {
        match Catalog::load(path) {
            Ok(catalog) if catalog.is_empty() => {
                report.warnings.push(format!("catalog {} has no items", path.display()))
            }
            Ok(_) => {}
            Err(e) => report.errors.push(format!("catalog {}: {}", path.display(), e)),
        }
    }

    if let Some(store) = &config.storefront.store {
        for (key, value) in [("name", &store.name), ("address", &store.address), ("phone", &store.phone)] {
            if value.trim().is_empty() {
                report.errors.push(format!("store.{} is required", key));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use supermas_commerce::catalog::StoreInfo;

    #[test]
    fn test_default_config_is_clean() {
        let report = validate(&CliConfig::default());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_zero_timeout_is_an_error() {
        let mut config = CliConfig::default();
        config.storefront.checkout.submit_timeout_ms = 0;
        assert_eq!(validate(&config).errors.len(), 1);
    }

    #[test]
    fn test_slow_simulation_warns() {
        let mut config = CliConfig::default();
        config.storefront.checkout.simulated_latency_ms = 20_000;
        let report = validate(&config);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_missing_catalog_and_blank_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storefront.catalog_path = Some(dir.path().join("missing.json"));
        config.storefront.store = Some(StoreInfo {
            phone: " ".to_string(),
            ..StoreInfo::default()
        });

        let report = validate(&config);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[1].contains("store.phone"));
    }
}
