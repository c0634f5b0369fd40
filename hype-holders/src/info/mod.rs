/// Hyperliquid Info API client
///
/// Every request is a JSON `POST` of `{"type": ..., "user": ...}` to a single endpoint.
use crate::{error::InfoError, ledger::LedgerUpdate};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;
use url::Url;

mod response;

pub use response::{DelegatorSummary, SpotBalance, SpotClearinghouseState};

/// Public Hyperliquid Info endpoint.
pub const DEFAULT_INFO_URL: &str = "https://api.hyperliquid.xyz/info";

/// Parse a decimal string, rejecting NaN and infinities.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Request kinds understood by the Info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    SpotClearinghouseState { user: String },
    DelegatorSummary { user: String },
    UserFills { user: String },
    UserNonFundingLedgerUpdates { user: String },
}

impl InfoRequest {
    /// Value of the `type` selector.
    pub fn kind(&self) -> &'static str {
        match self {
            InfoRequest::SpotClearinghouseState { .. } => "spotClearinghouseState",
            InfoRequest::DelegatorSummary { .. } => "delegatorSummary",
            InfoRequest::UserFills { .. } => "userFills",
            InfoRequest::UserNonFundingLedgerUpdates { .. } => "userNonFundingLedgerUpdates",
        }
    }
}

/// Info client configuration
#[derive(Debug, Clone)]
pub struct InfoClientConfig {
    /// Info endpoint URL
    pub url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for InfoClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INFO_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl InfoClientConfig {
    /// Create a new configuration with custom URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Typed client for the Info endpoint.
#[derive(Debug, Clone)]
pub struct InfoClient {
    http: reqwest::Client,
    url: Url,
}

impl InfoClient {
    pub fn new(config: InfoClientConfig) -> Result<Self, InfoError> {
        let url = Url::parse(&config.url)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send `request` and return the raw JSON body.
    pub async fn post_value(&self, request: &InfoRequest) -> Result<serde_json::Value, InfoError> {
        debug!(kind = request.kind(), url = %self.url, "sending Info request");

        let response = self.http.post(self.url.clone()).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfoError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send `request` and decode the body as `T`.
    pub async fn post<T>(&self, request: &InfoRequest) -> Result<T, InfoError>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(self.post_value(request).await?)?)
    }

    pub async fn spot_state(&self, user: &str) -> Result<SpotClearinghouseState, InfoError> {
        self.post(&InfoRequest::SpotClearinghouseState { user: user.to_string() })
            .await
    }

    pub async fn delegator_summary(&self, user: &str) -> Result<DelegatorSummary, InfoError> {
        self.post(&InfoRequest::DelegatorSummary { user: user.to_string() })
            .await
    }

    /// Trade fills, kept opaque.
    pub async fn user_fills(&self, user: &str) -> Result<Vec<serde_json::Value>, InfoError> {
        self.post(&InfoRequest::UserFills { user: user.to_string() })
            .await
    }

    /// Non-funding ledger updates. Malformed entries are dropped, see
    /// [`LedgerUpdate::parse_all`].
    pub async fn ledger_updates(&self, user: &str) -> Result<Vec<LedgerUpdate>, InfoError> {
        let value = self
            .post_value(&InfoRequest::UserNonFundingLedgerUpdates { user: user.to_string() })
            .await?;
        Ok(LedgerUpdate::parse_all(value))
    }
}
