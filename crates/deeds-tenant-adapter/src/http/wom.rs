/*
[INPUT]:  WoM server URL (from hub configuration), wallet addresses, deed ids
[OUTPUT]: Deeds owned, managed or leased by a wallet
[POS]:    HTTP layer - public WoM endpoints (no session)
[UPDATE]: When the WoM public API changes
*/

use reqwest::Method;

use crate::http::client::required;
use crate::http::{Result, TenantClient};
use crate::types::{Deed, WomPage};

const DEFAULT_LEASES_PAGE_SIZE: u32 = 50;

impl TenantClient {
    /// Deed ids a wallet may provision a hub for
    ///
    /// GET {wom}/api/hubs/managed-deeds/{address}
    pub async fn get_managed_deeds(&self, wom_server_url: &str, address: &str) -> Result<Vec<u64>> {
        let url = wom_url(wom_server_url, &format!("api/hubs/managed-deeds/{}", address));
        let builder = self.absolute_request(Method::GET, &url)?;
        required(self.send_json(builder).await?, &url)
    }

    /// Tenants (leased or owned deeds) of a wallet
    ///
    /// GET {wom}/api/tenants?address={address}
    pub async fn get_owned_deeds(&self, wom_server_url: &str, address: &str) -> Result<WomPage> {
        let url = wom_url(wom_server_url, "api/tenants");
        let builder = self
            .absolute_request(Method::GET, &url)?
            .query(&[("address", address)]);
        required(self.send_json(builder).await?, &url)
    }

    /// Confirmed leases where the wallet is the tenant
    ///
    /// GET {wom}/api/leases?address={address}&onlyConfirmed=true&owner=false&page={page}&size={size}
    pub async fn get_leases(
        &self,
        wom_server_url: &str,
        address: &str,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<WomPage> {
        let url = wom_url(wom_server_url, "api/leases");
        let builder = self.absolute_request(Method::GET, &url)?.query(&[
            ("address", address.to_string()),
            ("onlyConfirmed", "true".to_string()),
            ("owner", "false".to_string()),
            ("page", page.unwrap_or(0).to_string()),
            ("size", size.unwrap_or(DEFAULT_LEASES_PAGE_SIZE).to_string()),
        ]);
        required(self.send_json(builder).await?, &url)
    }

    /// GET {wom}/api/deeds/{deed_id}
    pub async fn get_deed(&self, wom_server_url: &str, deed_id: u64) -> Result<Deed> {
        let url = wom_url(wom_server_url, &format!("api/deeds/{}", deed_id));
        let builder = self.absolute_request(Method::GET, &url)?;
        required(self.send_json(builder).await?, &url)
    }
}

/// Join a configured server URL and a path, collapsing duplicate slashes
/// outside the scheme separator.
fn wom_url(base: &str, path: &str) -> String {
    let joined = format!("{}/{}", base, path);
    let (scheme, rest) = match joined.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, joined.as_str()),
    };

    let mut collapsed = String::with_capacity(rest.len());
    for c in rest.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }

    match scheme {
        Some(scheme) => format!("{}://{}", scheme, collapsed),
        None => collapsed,
    }
}
