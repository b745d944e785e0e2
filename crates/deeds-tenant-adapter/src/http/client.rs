/*
[INPUT]:  HTTP configuration (base URLs, timeouts, session cookie)
[OUTPUT]: Configured reqwest client and the uniform remote call adapter
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing status handling
*/

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::http::response::{RemoteBody, RemoteResponse, classify_failure, is_recognized_failure};
use crate::http::{Result, TenantError};

/// REST roots relative to the portal origin
const TENANT_REST_PATH: &str = "/deeds-tenant/rest/";
const PORTAL_REST_PATH: &str = "/portal/rest/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Raw `Cookie` header sent with every request, e.g. `JSESSIONID=...`
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            session_cookie: None,
        }
    }
}

/// HTTP client for the tenant hub REST surface
///
/// Cookies set by the server are kept for the lifetime of the client, so a
/// single instance carries the portal session across calls.
#[derive(Debug, Clone)]
pub struct TenantClient {
    http_client: Client,
    tenant_base_url: Url,
    portal_base_url: Url,
}

impl TenantClient {
    /// Create a client for a portal origin with default configuration
    pub fn new(portal_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), portal_url)
    }

    /// Create a client for a portal origin with custom configuration
    pub fn with_config(config: ClientConfig, portal_url: &str) -> Result<Self> {
        let origin = Url::parse(portal_url)?;
        let tenant_base_url = origin.join(TENANT_REST_PATH)?;
        let portal_base_url = origin.join(PORTAL_REST_PATH)?;
        Self::build(config, tenant_base_url, portal_base_url)
    }

    /// Create a client with explicit REST roots
    pub fn with_config_and_base_urls(
        config: ClientConfig,
        tenant_base_url: &str,
        portal_base_url: &str,
    ) -> Result<Self> {
        Self::build(
            config,
            parse_base_url(tenant_base_url)?,
            parse_base_url(portal_base_url)?,
        )
    }

    fn build(config: ClientConfig, tenant_base_url: Url, portal_base_url: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| TenantError::Config(format!("Invalid session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            tenant_base_url,
            portal_base_url,
        })
    }

    pub fn tenant_base_url(&self) -> &Url {
        &self.tenant_base_url
    }

    pub fn portal_base_url(&self) -> &Url {
        &self.portal_base_url
    }

    /// Build request builder for tenant REST endpoints
    pub(crate) fn tenant_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.tenant_base_url.join(endpoint.trim_start_matches('/'))?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder for portal REST endpoints
    pub(crate) fn portal_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.portal_base_url.join(endpoint.trim_start_matches('/'))?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder for an absolute URL (external servers)
    pub(crate) fn absolute_request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let url = Url::parse(url)?;
        Ok(self.http_client.request(method, url))
    }

    /// Issue a call against the tenant REST root and classify the outcome
    ///
    /// 2xx bodies are decoded as JSON when possible, 404 resolves to
    /// [`RemoteResponse::NotFound`], every other status becomes an error.
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<RemoteResponse> {
        let mut builder = self.tenant_request(method, endpoint)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = match self.execute(builder).await? {
            Some(text) => RemoteResponse::Found(RemoteBody::from_text(text)),
            None => RemoteResponse::NotFound,
        };
        Ok(response)
    }

    /// Send a request and decode a JSON body; `None` on 404
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>> {
        match self.execute(builder).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Send a request and return the raw body; `None` on 404
    pub(crate) async fn send_text(&self, builder: RequestBuilder) -> Result<Option<String>> {
        self.execute(builder).await
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Option<String>> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(Some(response.text().await?));
        }
        if status == StatusCode::NOT_FOUND {
            debug!(%method, %url, "resource not found");
            return Ok(None);
        }

        let body = if is_recognized_failure(status) {
            Some(response.text().await?)
        } else {
            None
        };
        let err = classify_failure(status, body.as_deref());
        warn!(%method, %url, status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }
}

/// Turn a 404 into the generic remote error for endpoints that must answer
pub(crate) fn required<T>(value: Option<T>, endpoint: &str) -> Result<T> {
    value.ok_or_else(|| {
        debug!(endpoint, "unexpected 404");
        TenantError::GenericRemote
    })
}

fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}
