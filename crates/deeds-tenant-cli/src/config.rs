/*
[INPUT]:  YAML configuration file, environment variables
[OUTPUT]: Parsed CLI configuration, tenant client and wallet provider
[POS]:    Configuration layer - portal and wallet setup
[UPDATE]: When adding new configuration options
*/

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use deeds_tenant_adapter::{ClientConfig, LocalWalletProvider, TenantClient, WalletProvider};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the tenant CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Portal origin, e.g. "https://tenant.example.com"
    pub portal_url: String,
    #[serde(default = "default_tenant_rest_path")]
    pub tenant_rest_path: String,
    #[serde(default = "default_portal_rest_path")]
    pub portal_rest_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Raw `Cookie` header for an authenticated portal session
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default)]
    pub wallet: Option<WalletConfig>,
}

/// Wallet used to sign challenges
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WalletConfig {
    /// Hex private key, inline
    #[serde(default)]
    pub private_key: Option<String>,
    /// Name of the environment variable holding the private key
    #[serde(default)]
    pub private_key_env: Option<String>,
    /// Skip the permission request like mobile wallet browsers do
    #[serde(default)]
    pub mobile: bool,
}

fn default_tenant_rest_path() -> String {
    "/deeds-tenant/rest/".to_string()
}

fn default_portal_rest_path() -> String {
    "/portal/rest/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            session_cookie: self.session_cookie.clone(),
        }
    }

    /// Tenant and portal REST roots joined onto the portal origin
    pub fn base_urls(&self) -> (String, String) {
        let origin = self.portal_url.trim_end_matches('/');
        (
            join_path(origin, &self.tenant_rest_path),
            join_path(origin, &self.portal_rest_path),
        )
    }

    pub fn build_client(&self) -> Result<TenantClient> {
        let (tenant, portal) = self.base_urls();
        TenantClient::with_config_and_base_urls(self.client_config(), &tenant, &portal)
            .context("build tenant client")
    }

    /// Wallet provider from the configured key, if any
    pub fn build_wallet(&self) -> Result<Option<Arc<dyn WalletProvider>>> {
        let Some(wallet) = &self.wallet else {
            return Ok(None);
        };
        let key = wallet.resolve_private_key()?;
        let provider = LocalWalletProvider::new(&key).context("load wallet private key")?;
        Ok(Some(Arc::new(provider)))
    }

    pub fn is_mobile(&self) -> bool {
        self.wallet.as_ref().is_some_and(|wallet| wallet.mobile)
    }
}

impl WalletConfig {
    /// Inline key wins over the environment variable
    pub fn resolve_private_key(&self) -> Result<String> {
        if let Some(key) = self.private_key.as_deref().filter(|key| !key.trim().is_empty()) {
            return Ok(key.trim().to_string());
        }
        match &self.private_key_env {
            Some(name) => {
                let key = std::env::var(name)
                    .with_context(|| format!("read wallet key from ${name}"))?;
                if key.trim().is_empty() {
                    bail!("environment variable {name} is empty");
                }
                Ok(key.trim().to_string())
            }
            None => bail!("wallet requires private_key or private_key_env"),
        }
    }
}

fn join_path(origin: &str, path: &str) -> String {
    format!("{}/{}", origin, path.trim_matches('/'))
}
