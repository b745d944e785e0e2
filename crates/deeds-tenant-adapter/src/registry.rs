/*
[INPUT]:  Tenant client and wallet provider built by the application bootstrap
[OUTPUT]: Shared service handles (client, handshake, hub connector)
[POS]:    Composition root - explicit service registry
[UPDATE]: When adding services that the application wires at startup
*/

use std::sync::Arc;

use crate::http::TenantClient;
use crate::wallet::{HandshakeController, HubConnector, WalletProvider};

/// Services shared by the application, built once at startup
#[derive(Clone)]
pub struct ServiceRegistry {
    client: Arc<TenantClient>,
    wallet: Option<Arc<dyn WalletProvider>>,
}

impl ServiceRegistry {
    pub fn new(client: TenantClient) -> Self {
        Self {
            client: Arc::new(client),
            wallet: None,
        }
    }

    /// Register the wallet provider; the first registration wins
    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        if self.wallet.is_none() {
            self.wallet = Some(wallet);
        }
        self
    }

    /// REST client for hub, report, tenant and WoM endpoints
    pub fn client(&self) -> &TenantClient {
        &self.client
    }

    pub fn handshake(&self) -> Option<HandshakeController> {
        self.wallet.clone().map(HandshakeController::new)
    }

    pub fn hub_connector(&self) -> Option<HubConnector> {
        self.handshake()
            .map(|handshake| HubConnector::new(self.client.clone(), handshake))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::MockWalletProvider;

    #[test]
    fn test_registry_without_wallet() {
        let registry = ServiceRegistry::new(TenantClient::new("https://hub.example.com").unwrap());
        assert!(registry.handshake().is_none());
        assert!(registry.hub_connector().is_none());
    }

    #[tokio::test]
    async fn test_first_wallet_registration_wins() {
        let first = Arc::new(MockWalletProvider::new("0xfirst"));
        let second = Arc::new(MockWalletProvider::new("0xsecond"));

        let registry = ServiceRegistry::new(TenantClient::new("https://hub.example.com").unwrap())
            .with_wallet(first)
            .with_wallet(second);

        let address = registry
            .handshake()
            .expect("wallet registered")
            .retrieve_address()
            .await
            .unwrap();
        assert_eq!(address.as_deref(), Some("0xfirst"));
    }
}
