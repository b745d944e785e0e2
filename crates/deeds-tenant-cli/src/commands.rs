/*
[INPUT]:  Parsed CLI subcommand and the service registry
[OUTPUT]: JSON value describing the command result
[POS]:    Command layer - maps subcommands onto adapter operations
[UPDATE]: When adding subcommands or adapter operations
*/

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use deeds_tenant_adapter::{
    ConnectorOutcome, HandshakeController, HandshakeOutcome, ServiceRegistry,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sign a challenge with the configured wallet
    Sign { challenge: String },
    /// Print the wallet's active address
    Address,
    /// Show the hub state
    Hub {
        #[arg(long = "nft-id")]
        nft_id: Option<u64>,
        #[arg(long)]
        refresh: bool,
    },
    /// Show the hub configuration
    Configuration,
    /// Show the tenant status from the portal
    Status,
    /// Request a fresh connection token from the hub
    Token,
    /// Connect the hub to the WoM with a signed token
    Connect {
        deed_id: u64,
        #[arg(long = "earner")]
        earner_address: Option<String>,
    },
    /// Disconnect the hub from the WoM with a signed token
    Disconnect,
    /// List reward reports
    Reports {
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one reward report
    Report {
        id: u64,
        #[arg(long)]
        refresh: bool,
    },
    /// Send a reward report to the WoM
    SendReport { id: u64 },
    /// Check whether an address manages a deed tenant
    Manager {
        nft_id: u64,
        /// Defaults to the wallet address
        #[arg(long)]
        address: Option<String>,
    },
    /// List deeds managed by an address on the WoM
    Deeds {
        /// Defaults to the wallet address
        #[arg(long)]
        address: Option<String>,
    },
}

/// Run one command; 404 answers are printed as `null`
pub async fn run(command: Command, registry: &ServiceRegistry, is_mobile: bool) -> Result<Value> {
    let client = registry.client();
    match command {
        Command::Sign { challenge } => {
            let outcome = handshake(registry)?
                .authenticate(&challenge, is_mobile)
                .await
                .context("sign challenge")?;
            Ok(match outcome {
                HandshakeOutcome::Signed { token, address } => json!({
                    "address": address,
                    "signedMessage": token,
                }),
                HandshakeOutcome::OnboardingStarted => onboarding(),
            })
        }
        Command::Address => {
            let address = handshake(registry)?
                .retrieve_address()
                .await
                .context("read wallet address")?;
            Ok(json!({ "address": address }))
        }
        Command::Hub { nft_id, refresh } => {
            to_json(client.get_hub(nft_id, refresh).await.context("get hub")?)
        }
        Command::Configuration => {
            to_json(client.get_configuration().await.context("get hub configuration")?)
        }
        Command::Status => to_json(client.get_hub_status().await.context("get tenant status")?),
        Command::Token => {
            let token = client.generate_token().await.context("generate hub token")?;
            Ok(json!({ "token": token }))
        }
        Command::Connect {
            deed_id,
            earner_address,
        } => {
            let connector = registry
                .hub_connector()
                .ok_or_else(|| anyhow!("a wallet must be configured to connect"))?;
            let outcome = connector
                .connect(deed_id, earner_address.as_deref(), is_mobile)
                .await
                .context("connect hub")?;
            match outcome {
                ConnectorOutcome::Completed(hub) => {
                    info!(deed_id, "hub connected");
                    to_json(hub)
                }
                ConnectorOutcome::OnboardingStarted => Ok(onboarding()),
            }
        }
        Command::Disconnect => {
            let connector = registry
                .hub_connector()
                .ok_or_else(|| anyhow!("a wallet must be configured to disconnect"))?;
            match connector.disconnect(is_mobile).await.context("disconnect hub")? {
                ConnectorOutcome::Completed(()) => Ok(json!({ "disconnected": true })),
                ConnectorOutcome::OnboardingStarted => Ok(onboarding()),
            }
        }
        Command::Reports { offset, limit } => {
            to_json(client.get_reports(offset, limit).await.context("list reports")?)
        }
        Command::Report { id, refresh } => {
            to_json(client.get_report(id, refresh).await.context("get report")?)
        }
        Command::SendReport { id } => {
            to_json(client.send_report(id).await.context("send report")?)
        }
        Command::Manager { nft_id, address } => {
            let address = address_or_wallet(registry, address).await?;
            let is_manager = client
                .is_tenant_manager(&address, nft_id)
                .await
                .context("check tenant manager")?;
            Ok(json!({ "address": address, "nftId": nft_id, "manager": is_manager }))
        }
        Command::Deeds { address } => {
            let address = address_or_wallet(registry, address).await?;
            let configuration = client
                .get_configuration()
                .await
                .context("get hub configuration")?;
            let wom_url = configuration
                .wom_server_url
                .ok_or_else(|| anyhow!("hub configuration has no WoM server URL"))?;
            let deeds = client
                .get_managed_deeds(&wom_url, &address)
                .await
                .context("list managed deeds")?;
            Ok(json!({ "address": address, "deeds": deeds }))
        }
    }
}

fn handshake(registry: &ServiceRegistry) -> Result<HandshakeController> {
    registry
        .handshake()
        .ok_or_else(|| anyhow!("no wallet configured"))
}

async fn address_or_wallet(registry: &ServiceRegistry, address: Option<String>) -> Result<String> {
    if let Some(address) = address {
        return Ok(address.to_ascii_lowercase());
    }
    handshake(registry)?
        .retrieve_address()
        .await
        .context("read wallet address")?
        .ok_or_else(|| anyhow!("wallet exposes no account"))
}

fn onboarding() -> Value {
    json!({ "onboardingStarted": true })
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("serialize response")
}
