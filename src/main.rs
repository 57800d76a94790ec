#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use standard_webhooks::config::default_config_path;
use standard_webhooks::{Clock, ProfilePreset, SystemClock, WebhookConfig};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// `swh` - sign and verify Standard Webhooks deliveries.
#[derive(Parser, Debug)]
#[command(name = "swh")]
#[command(version)]
#[command(about = "Sign and verify Standard Webhooks deliveries.", long_about = None)]
struct Cli {
    /// Config file (default: user config dir, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Signing secret, overrides config and environment
    #[arg(long, global = true)]
    secret: Option<String>,

    /// Header preset (standard, legacy)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign a payload and print the delivery headers
    Sign {
        /// Message id
        #[arg(long)]
        id: String,

        /// Unix timestamp in seconds (default: now)
        #[arg(long)]
        timestamp: Option<u64>,

        /// Read the payload from a file instead of stdin
        #[arg(long)]
        payload_file: Option<PathBuf>,
    },

    /// Verify a payload against delivery headers
    Verify {
        /// Header as `name: value`; repeat for each header
        #[arg(short = 'H', long = "header", required = true)]
        headers: Vec<String>,

        /// Read the payload from a file instead of stdin
        #[arg(long)]
        payload_file: Option<PathBuf>,

        /// Accept deliveries outside the tolerance window
        #[arg(long)]
        ignore_timestamp: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = resolve_config(&cli)?;
    let webhook = config.build().context("failed to build webhook signer")?;

    match cli.command {
        Commands::Sign {
            id,
            timestamp,
            payload_file,
        } => {
            let payload = read_payload(payload_file.as_deref())?;
            let timestamp = timestamp.unwrap_or_else(|| SystemClock.now());
            for (name, value) in webhook.signed_headers(&id, timestamp, &payload) {
                println!("{name}: {value}");
            }
        }
        Commands::Verify {
            headers,
            payload_file,
            ignore_timestamp,
        } => {
            let payload = read_payload(payload_file.as_deref())?;
            let headers = headers
                .iter()
                .map(String::as_str)
                .map(parse_header)
                .collect::<Result<Vec<_>>>()?;
            let outcome = if ignore_timestamp {
                webhook.verify_ignoring_timestamp(&payload, &headers)
            } else {
                webhook.verify(&payload, &headers)
            };
            outcome.map_err(|e| anyhow::anyhow!("verification failed [{}]: {e}", e.kind()))?;
            println!("ok");
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<WebhookConfig> {
    let mut config = match &cli.config {
        Some(path) => WebhookConfig::load(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => WebhookConfig::load(&path)?,
            _ => WebhookConfig::default(),
        },
    }
    .with_env_overrides();

    if let Some(secret) = &cli.secret {
        config.secret = Some(secret.clone());
    }
    if let Some(name) = &cli.profile {
        config.profile = ProfilePreset::parse(name)?;
        config.headers = None;
    }
    Ok(config)
}

fn read_payload(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read payload from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("header `{raw}` is not `name: value`"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}
