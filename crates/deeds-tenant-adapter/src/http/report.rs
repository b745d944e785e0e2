/*
[INPUT]:  Report identifiers and paging parameters
[OUTPUT]: Hub reward reports with their local sending state
[POS]:    HTTP layer - report endpoints (session cookie required)
[UPDATE]: When adding report endpoints or changing paging defaults
*/

use reqwest::Method;
use serde_json::Value;

use crate::http::client::required;
use crate::http::{Result, TenantClient};
use crate::types::HubReport;

const DEFAULT_REPORTS_LIMIT: u32 = 10;

impl TenantClient {
    /// List reward reports, most recent first
    ///
    /// GET reports?offset={offset}&limit={limit}
    pub async fn get_reports(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Option<Vec<HubReport>>> {
        let builder = self.tenant_request(Method::GET, "reports")?.query(&[
            ("offset", offset.unwrap_or(0)),
            ("limit", limit.unwrap_or(DEFAULT_REPORTS_LIMIT)),
        ]);
        self.send_json(builder).await
    }

    /// Get a single report, optionally refreshed from the WoM
    ///
    /// GET reports/{id}?refresh={refresh}
    pub async fn get_report(&self, id: u64, refresh: bool) -> Result<Option<HubReport>> {
        let endpoint = format!("reports/{}", id);
        let builder = self
            .tenant_request(Method::GET, &endpoint)?
            .query(&[("refresh", refresh)]);
        self.send_json(builder).await
    }

    /// Send a report to the WoM
    ///
    /// PUT reports/{id}
    pub async fn send_report(&self, id: u64) -> Result<Option<HubReport>> {
        let endpoint = format!("reports/{}", id);
        let builder = self.tenant_request(Method::PUT, &endpoint)?;
        self.send_json(builder).await
    }

    /// Rewards the local wallet would distribute for the period containing `date`
    ///
    /// GET /portal/rest/wallet/api/reward/compute?date={date}
    pub async fn get_local_reward_details(&self, date: &str) -> Result<Value> {
        let endpoint = "wallet/api/reward/compute";
        let builder = self
            .portal_request(Method::GET, endpoint)?
            .query(&[("date", date)]);
        required(self.send_json(builder).await?, endpoint)
    }
}
