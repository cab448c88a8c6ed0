//! SuperMas CLI - Terminal storefront for the SuperMas ordering core.
//!
//! Commands:
//! - `supermas menu` - List the menu
//! - `supermas item` - Show one item with its options
//! - `supermas order` - Place an order non-interactively
//! - `supermas shop` - Interactive ordering session
//! - `supermas info` - Store details and opening hours
//! - `supermas config` - Manage configuration

mod commands;
mod config;
mod context;
mod journal;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, InfoArgs, ItemArgs, MenuArgs, OrderArgs, ShopArgs};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "SUPERMAS_LOG";

/// SuperMas CLI - Browse the menu and place orders
#[derive(Parser)]
#[command(name = "supermas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items
    Menu(MenuArgs),

    /// Show a menu item and its options
    Item(ItemArgs),

    /// Place an order without prompts
    Order(OrderArgs),

    /// Start an interactive ordering session
    Shop(ShopArgs),

    /// Show store details and opening hours
    Info(InfoArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Item(args) => commands::item::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Info(args) => commands::info::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, filtered by `SUPERMAS_LOG` (default `warn`, `debug` with
/// `--verbose`). JSON output switches the log lines to JSON as well.
fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supermas_commerce::checkout::PaymentMethod;

    const ORDER: [&str; 8] = ["supermas", "order", "-n", "Aoife", "-p", "087", "-a", "Main St"];

    fn order_args(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(ORDER.iter().chain(["-i", "k1"].iter()).chain(extra.iter()))
    }

    #[test]
    fn test_payment_flag_parses_method() {
        let Commands::Order(args) = order_args(&["--payment", "Card"]).unwrap().command else {
            panic!("expected the order command");
        };
        assert_eq!(args.payment, PaymentMethod::Card);

        let Commands::Order(args) = order_args(&[]).unwrap().command else {
            panic!("expected the order command");
        };
        assert_eq!(args.payment, PaymentMethod::Cash);
    }

    #[test]
    fn test_payment_flag_rejects_unknown_method() {
        let err = order_args(&["--payment", "cheque"]).err().unwrap();
        assert!(err.to_string().contains("cheque"));
    }
}
