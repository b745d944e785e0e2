/*
[INPUT]:  Deed identifiers and signed connection requests
[OUTPUT]: Hub state, configuration, and connection results
[POS]:    HTTP layer - hub endpoints (session cookie required)
[UPDATE]: When adding new hub endpoints or changing request bodies
*/

use reqwest::Method;

use crate::http::client::required;
use crate::http::{Result, TenantClient};
use crate::types::{Hub, HubConfiguration, WomConnectionRequest, WomDisconnectionRequest};

impl TenantClient {
    /// Get the hub, optionally for a given deed
    ///
    /// GET hub?nftId={nft_id}&forceRefresh=true
    pub async fn get_hub(&self, nft_id: Option<u64>, force_refresh: bool) -> Result<Option<Hub>> {
        let mut params = Vec::new();
        if let Some(id) = nft_id {
            params.push(("nftId", id.to_string()));
        }
        if force_refresh {
            params.push(("forceRefresh", "true".to_string()));
        }

        let builder = self.tenant_request(Method::GET, "hub")?.query(&params);
        self.send_json(builder).await
    }

    /// Connect the hub to the WoM
    ///
    /// POST hub
    pub async fn connect_to_wom(&self, request: &WomConnectionRequest) -> Result<Hub> {
        let builder = self.tenant_request(Method::POST, "hub")?.json(request);
        required(self.send_json(builder).await?, "hub")
    }

    /// Disconnect the hub from the WoM
    ///
    /// DELETE hub
    pub async fn disconnect_from_wom(&self, request: &WomDisconnectionRequest) -> Result<()> {
        let builder = self.tenant_request(Method::DELETE, "hub")?.json(request);
        required(self.send_text(builder).await?, "hub")?;
        Ok(())
    }

    /// Generate the token a deed manager signs to prove wallet ownership
    ///
    /// GET hub/token
    pub async fn generate_token(&self) -> Result<String> {
        let builder = self.tenant_request(Method::GET, "hub/token")?;
        let body = required(self.send_text(builder).await?, "hub/token")?;
        Ok(unquote(body))
    }

    /// Get hub configuration (WoM server URL, contract addresses, network)
    ///
    /// GET hub/configuration
    pub async fn get_configuration(&self) -> Result<HubConfiguration> {
        let builder = self.tenant_request(Method::GET, "hub/configuration")?;
        required(self.send_json(builder).await?, "hub/configuration")
    }
}

/// Plain-text bodies sometimes arrive JSON-encoded
fn unquote(body: String) -> String {
    match serde_json::from_str::<String>(&body) {
        Ok(inner) => inner,
        Err(_) => body,
    }
}
