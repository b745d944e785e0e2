/*
[INPUT]:  Tenant client and wallet handshake controller
[OUTPUT]: Hub connected to / disconnected from the WoM
[POS]:    Wallet layer - orchestrates the signed hub connection flow
[UPDATE]: When connection endpoints or flow steps change
*/

use std::sync::Arc;

use tracing::info;

use crate::http::{Result, TenantClient};
use crate::types::{Hub, WomConnectionRequest, WomDisconnectionRequest};

use super::{HandshakeController, HandshakeOutcome, SignedToken};

/// Result of a flow that may stop at wallet onboarding
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorOutcome<T> {
    Completed(T),
    OnboardingStarted,
}

/// Connects the hub to the WoM with a wallet-signed server token
#[derive(Clone)]
pub struct HubConnector {
    client: Arc<TenantClient>,
    handshake: HandshakeController,
}

impl HubConnector {
    pub fn new(client: Arc<TenantClient>, handshake: HandshakeController) -> Self {
        Self { client, handshake }
    }

    /// Complete connection flow
    ///
    /// 1. Fetch a token from the hub
    /// 2. Sign it with the deed manager wallet
    /// 3. Submit the connection request
    pub async fn connect(
        &self,
        deed_id: u64,
        earner_address: Option<&str>,
        is_mobile: bool,
    ) -> Result<ConnectorOutcome<Hub>> {
        let (token, signed_message, manager_address) = match self.sign_token(is_mobile).await? {
            Some(signed) => signed,
            None => return Ok(ConnectorOutcome::OnboardingStarted),
        };

        let request = WomConnectionRequest {
            deed_id,
            earner_address: earner_address
                .map(str::to_string)
                .unwrap_or_else(|| manager_address.clone()),
            deed_manager_address: manager_address,
            signed_message,
            raw_message: token.clone(),
            token,
        };
        let hub = self.client.connect_to_wom(&request).await?;
        info!(deed_id, "hub connected to WoM");
        Ok(ConnectorOutcome::Completed(hub))
    }

    /// Complete disconnection flow, signed like [`HubConnector::connect`]
    pub async fn disconnect(&self, is_mobile: bool) -> Result<ConnectorOutcome<()>> {
        let (token, signed_message, manager_address) = match self.sign_token(is_mobile).await? {
            Some(signed) => signed,
            None => return Ok(ConnectorOutcome::OnboardingStarted),
        };

        let request = WomDisconnectionRequest {
            deed_manager_address: manager_address,
            signed_message,
            raw_message: token.clone(),
            token,
        };
        self.client.disconnect_from_wom(&request).await?;
        info!("hub disconnected from WoM");
        Ok(ConnectorOutcome::Completed(()))
    }

    async fn sign_token(&self, is_mobile: bool) -> Result<Option<(String, SignedToken, String)>> {
        let token = self.client.generate_token().await?;
        match self.handshake.authenticate(&token, is_mobile).await? {
            HandshakeOutcome::Signed { token: signed, address } => Ok(Some((token, signed, address))),
            HandshakeOutcome::OnboardingStarted => Ok(None),
        }
    }
}
