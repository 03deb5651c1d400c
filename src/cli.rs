// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the kiosk UI starts. Subcommands are maintenance
// tools for whoever installs the kiosk:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - catalog [SOURCE]: Fetch a catalog and print how it fills the trays

use crate::catalog::{self, format_price, CatalogSource};
use crate::config::{Config, VERSION};
use crate::kiosk::trays;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// Wendor - self-service vending kiosk
#[derive(Parser)]
#[command(name = "wendor-kiosk")]
#[command(version = VERSION)]
#[command(about = "Self-service vending kiosk", long_about = None)]
pub struct Cli {
    /// Catalog file or URL (overrides config and WENDOR_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Load a catalog and print its tray layout
    Catalog {
        /// File path or http(s) URL; defaults to the configured catalog
        source: Option<String>,
    },
}

/// Run a maintenance subcommand to completion
pub async fn run(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Config { show, reset, path } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show(&config);
                Ok(())
            } else if reset {
                handle_config_reset()
            } else {
                println!("Usage: wendor-kiosk config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
                Ok(())
            }
        }
        Commands::Catalog { source } => {
            let location = source.unwrap_or(config.catalog.clone());
            handle_catalog(&location, &config.currency).await
        }
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Error writing config to {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

async fn handle_catalog(location: &str, currency: &str) -> Result<()> {
    let source = CatalogSource::parse(location);
    let products = catalog::fetch(&source)
        .await
        .with_context(|| format!("Failed to load catalog from {}", source))?;

    println!("Catalog: {} ({} products)", source, products.len());
    for tray in trays::partition(&products) {
        println!();
        if tray.is_empty() {
            println!("Tray {}: empty", tray.number);
            continue;
        }
        println!("Tray {}: {} products", tray.number, tray.products.len());
        for (slot, product) in tray.products.iter().enumerate() {
            println!(
                "  {}. {:<32} {:>10}  [{}]",
                slot + 1,
                product.product_name,
                format_price(currency, product.product_price),
                product.product_id
            );
        }
    }

    if products.len() > trays::TRAY_CAPACITY {
        println!();
        println!(
            "{} products do not fit in the trays and will not be shown",
            products.len() - trays::TRAY_CAPACITY
        );
    }
    Ok(())
}
