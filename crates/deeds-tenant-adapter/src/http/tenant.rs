/*
[INPUT]:  Wallet addresses and deed identifiers
[OUTPUT]: Tenant provisioning state, hub status, manager checks, portal WoM connection
[POS]:    HTTP layer - portal tenant endpoints (session cookie required)
[UPDATE]: When adding tenant endpoints or changing response format
*/

use reqwest::Method;

use crate::http::client::required;
use crate::http::{Result, TenantClient};
use crate::types::{
    DeedTenant, HubConfiguration, HubStatus, WomConnectionRequest, WomDisconnectionRequest,
};

impl TenantClient {
    /// GET deed/tenant/configuration
    pub async fn get_tenant_configuration(&self) -> Result<HubConfiguration> {
        let builder = self.portal_request(Method::GET, "deed/tenant/configuration")?;
        required(self.send_json(builder).await?, "deed/tenant/configuration")
    }

    /// GET deed/tenant/status
    pub async fn get_hub_status(&self) -> Result<HubStatus> {
        let builder = self.portal_request(Method::GET, "deed/tenant/status")?;
        required(self.send_json(builder).await?, "deed/tenant/status")
    }

    /// Check whether `address` manages the deed
    ///
    /// GET deed/tenant/manager?address={address}&nftId={nft_id}
    pub async fn is_tenant_manager(&self, address: &str, nft_id: u64) -> Result<bool> {
        let builder = self
            .portal_request(Method::GET, "deed/tenant/manager")?
            .query(&[("address", address.to_string()), ("nftId", nft_id.to_string())]);
        let body = required(self.send_text(builder).await?, "deed/tenant/manager")?;
        Ok(body.trim() == "true")
    }

    /// GET deed/tenant?nftId={nft_id}
    pub async fn get_deed_tenant(&self, nft_id: u64) -> Result<Option<DeedTenant>> {
        let builder = self
            .portal_request(Method::GET, "deed/tenant")?
            .query(&[("nftId", nft_id)]);
        self.send_json(builder).await
    }

    /// Connect the tenant to the WoM through the portal
    ///
    /// POST deed/tenant/connect
    pub async fn connect_tenant_to_wom(&self, request: &WomConnectionRequest) -> Result<()> {
        let builder = self
            .portal_request(Method::POST, "deed/tenant/connect")?
            .json(request);
        required(self.send_text(builder).await?, "deed/tenant/connect")?;
        Ok(())
    }

    /// POST deed/tenant/disconnect
    pub async fn disconnect_tenant_from_wom(&self, request: &WomDisconnectionRequest) -> Result<()> {
        let builder = self
            .portal_request(Method::POST, "deed/tenant/disconnect")?
            .json(request);
        required(self.send_text(builder).await?, "deed/tenant/disconnect")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, TenantClient, TenantError};
    use crate::types::{WomConnectionRequest, WomDisconnectionRequest};
    use crate::wallet::SignedToken;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TenantClient {
        TenantClient::with_config_and_base_urls(
            ClientConfig::default(),
            &format!("{}/deeds-tenant/rest", server.uri()),
            &format!("{}/portal/rest", server.uri()),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_is_tenant_manager() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/portal/rest/deed/tenant/manager"))
            .and(query_param("address", "0xabc"))
            .and(query_param("nftId", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client(&server).is_tenant_manager("0xabc", 4).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_tenant_manager_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/portal/rest/deed/tenant/manager"))
            .respond_with(ResponseTemplate::new(401).set_body_string("wom.unauthorizedUser"))
            .mount(&server)
            .await;

        let err = client(&server).is_tenant_manager("0xabc", 4).await.unwrap_err();
        assert!(matches!(err, TenantError::Remote { ref key } if key == "wom.unauthorizedUser"));
    }

    #[tokio::test]
    async fn test_get_deed_tenant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/portal/rest/deed/tenant"))
            .and(query_param("nftId", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nftId": 4,
                "cityIndex": 0,
                "cardType": 1,
                "provisioned": true,
                "managerAddress": "0xabc"
            })))
            .mount(&server)
            .await;

        let tenant = client(&server).get_deed_tenant(4).await.unwrap().unwrap();
        assert_eq!(tenant.nft_id, 4);
        assert_eq!(tenant.manager_address.as_deref(), Some("0xabc"));
    }

    #[tokio::test]
    async fn test_get_hub_status_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/portal/rest/deed/tenant/status"))
            .respond_with(ResponseTemplate::new(500).set_body_string("tenant.notFound: boom"))
            .mount(&server)
            .await;

        let err = client(&server).get_hub_status().await.unwrap_err();
        assert!(matches!(err, TenantError::GenericRemote));
    }

    #[tokio::test]
    async fn test_is_tenant_manager_encodes_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/portal/rest/deed/tenant/manager"))
            .and(query_param("address", "0xabc&nftId=1"))
            .and(query_param("nftId", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_string("false"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(!client(&server).is_tenant_manager("0xabc&nftId=1", 4).await.unwrap());
    }

    fn connection_request() -> WomConnectionRequest {
        WomConnectionRequest {
            deed_id: 4,
            deed_manager_address: "0xabc".to_string(),
            earner_address: "0xdef".to_string(),
            signed_message: SignedToken::from_signature("0x1234"),
            raw_message: "token".to_string(),
            token: "token".to_string(),
        }
    }

    #[tokio::test]
    async fn test_connect_tenant_to_wom() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/portal/rest/deed/tenant/connect"))
            .and(body_json(json!({
                "deedId": 4,
                "deedManagerAddress": "0xabc",
                "earnerAddress": "0xdef",
                "signedMessage": "SIGNED_MESSAGE@0x1234",
                "rawMessage": "token",
                "token": "token",
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .connect_tenant_to_wom(&connection_request())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_connect_tenant_to_wom_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/portal/rest/deed/tenant/connect"))
            .respond_with(
                ResponseTemplate::new(503).set_body_string("wom.unableToConnect: timeout"),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .connect_tenant_to_wom(&connection_request())
            .await
            .unwrap_err();
        assert_eq!(err.message_key(), Some("wom.unableToConnect"));
    }

    #[tokio::test]
    async fn test_disconnect_tenant_from_wom_missing_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/portal/rest/deed/tenant/disconnect"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let request = WomDisconnectionRequest {
            deed_manager_address: "0xabc".to_string(),
            signed_message: SignedToken::from_signature("0x1234"),
            raw_message: "token".to_string(),
            token: "token".to_string(),
        };
        let err = client(&server)
            .disconnect_tenant_from_wom(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, TenantError::GenericRemote));
    }
}
