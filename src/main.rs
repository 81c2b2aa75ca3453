//! Entry point for the ttl-shortener service.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults (0.0.0.0:4000)
//! cargo run
//!
//! # Override the bind address and public origin
//! cargo run -- --listen 127.0.0.1:8080 --base-url https://s.example.com
//!
//! # Validate configuration and exit
//! cargo run -- --check-config
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use ttl_shortener::{config, server};

/// Expiring URL shortener with click analytics.
#[derive(Parser)]
#[command(name = "ttl-shortener")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(long)]
    listen: Option<String>,

    /// Public origin used in short links, overrides `BASE_URL`
    #[arg(long)]
    base_url: Option<String>,

    /// Validate configuration, print a summary and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mut config = config::Config::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    config.validate().context("Invalid configuration")?;

    init_tracing(&config)?;
    config.print_summary();

    if cli.check_config {
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    server::run(config).await
}

fn init_tracing(config: &config::Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid RUST_LOG filter '{}'", config.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
