/*
[INPUT]:  CLI arguments, YAML configuration file
[OUTPUT]: JSON result of one tenant hub command on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use deeds_tenant_adapter::ServiceRegistry;
use deeds_tenant_cli::{CliConfig, Command, commands};

#[derive(Parser, Debug)]
#[command(name = "deeds-tenant", version, about = "Deeds tenant hub operator CLI")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(&args.config_path)?;
    info!(portal_url = %config.portal_url, "configuration loaded");

    let registry = build_registry(&config)?;
    debug!(command = ?args.command, "running command");

    let output = commands::run(args.command, &registry, config.is_mobile()).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("format output")?
    );
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}

fn build_registry(config: &CliConfig) -> Result<ServiceRegistry> {
    let registry = ServiceRegistry::new(config.build_client()?);
    Ok(match config.build_wallet()? {
        Some(wallet) => registry.with_wallet(wallet),
        None => registry,
    })
}
