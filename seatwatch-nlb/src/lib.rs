//! seatwatch-nlb
//!
//! Public connector that implements `SeatConnector` on top of the National
//! Library Board seat booking API. Exposes the branch directory and windowed
//! seat availability.
#![warn(missing_docs)]

mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use serde::de::DeserializeOwned;
use seatwatch_core::connector::{FacilityProvider, SeatConnector, WindowProvider};
use seatwatch_core::{Facility, SeatWatchError, WindowQuery, WindowResult};

/// Production base URL of the seat booking API.
pub const DEFAULT_BASE_URL: &str = "https://www.nlb.gov.sg/seatbooking/api/";
/// Referer the API expects on every request.
pub const REFERER_VALUE: &str = "https://www.nlb.gov.sg/";

const GET_ACCOUNT_INFO: &str = "accounts/GetAccountInfo";
const SEARCH_AVAILABLE_AREAS: &str = "areas/SearchAvailableAreas";

/// Public connector type. Production users will construct with `NlbConnector::new_default()`.
pub struct NlbConnector {
    client: reqwest::Client,
    base_url: String,
}

/// Builder for [`NlbConnector`].
#[derive(Debug, Clone)]
pub struct NlbConnectorBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for NlbConnectorBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl NlbConnectorBuilder {
    /// Override the API base URL (e.g. a local mock server).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// HTTP-level timeout for each request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the base URL is empty or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<NlbConnector, SeatWatchError> {
        let mut base_url = self.base_url.trim().to_string();
        if base_url.is_empty() {
            return Err(SeatWatchError::InvalidArg("base_url is empty".to_string()));
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
        let mut client = reqwest::Client::builder().default_headers(headers);
        if let Some(t) = self.timeout {
            client = client.timeout(t);
        }
        let client = client
            .build()
            .map_err(|e| SeatWatchError::InvalidArg(format!("http client: {e}")))?;
        Ok(NlbConnector { client, base_url })
    }
}

impl NlbConnector {
    /// Connector name used to tag errors.
    pub const NAME: &'static str = "seatwatch-nlb";

    /// Connector against the production API with default HTTP settings.
    ///
    /// Falls back to a plain client if the configured one cannot be built.
    #[must_use]
    pub fn new_default() -> Self {
        Self::builder().build().unwrap_or_else(|_| Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Start configuring a connector.
    #[must_use]
    pub fn builder() -> NlbConnectorBuilder {
        NlbConnectorBuilder::default()
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_reqwest(e: &reqwest::Error, capability: &str) -> SeatWatchError {
        if e.is_timeout() {
            SeatWatchError::provider_timeout(Self::NAME, capability)
        } else {
            SeatWatchError::transport(Self::NAME, e.to_string())
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        capability: &str,
    ) -> Result<T, SeatWatchError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Self::map_reqwest(&e, capability))?;

        let status = resp.status();
        if status.as_u16() == 429 || status.is_server_error() {
            return Err(SeatWatchError::transport(
                Self::NAME,
                format!("{path} returned HTTP {status}"),
            ));
        }
        if !status.is_success() {
            return Err(SeatWatchError::Data(format!(
                "{path} returned HTTP {status}"
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Self::map_reqwest(&e, capability))?;
        serde_json::from_slice(&body)
            .map_err(|e| SeatWatchError::Data(format!("{path}: malformed payload: {e}")))
    }
}

impl SeatConnector for NlbConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn vendor(&self) -> &'static str {
        "National Library Board"
    }
    fn as_facility_provider(&self) -> Option<&dyn FacilityProvider> {
        Some(self as &dyn FacilityProvider)
    }
    fn as_window_provider(&self) -> Option<&dyn WindowProvider> {
        Some(self as &dyn WindowProvider)
    }
}

#[async_trait]
impl FacilityProvider for NlbConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "seatwatch_nlb::facilities", skip(self))
    )]
    async fn facilities(&self) -> Result<Vec<Facility>, SeatWatchError> {
        let info: wire::AccountInfo = self.get_json(GET_ACCOUNT_INFO, &[], "facilities").await?;
        info.into_facilities()
    }
}

#[async_trait]
impl WindowProvider for NlbConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "seatwatch_nlb::available_seats",
            skip(self, query),
            fields(branch = query.facility_id, anchor = %query.anchor),
        )
    )]
    async fn available_seats(&self, query: &WindowQuery) -> Result<WindowResult, SeatWatchError> {
        let minutes = query.duration_minutes();
        if minutes <= 0 {
            return Err(SeatWatchError::InvalidArg(
                "window duration must be at least one minute".to_string(),
            ));
        }
        let params = [
            ("Mode", "OffsiteMode".to_string()),
            ("BranchId", query.facility_id.to_string()),
            (
                "StartTime",
                query.anchor.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ),
            ("DurationInMinutes", minutes.to_string()),
        ];
        let resp: wire::SearchResponse = self
            .get_json(SEARCH_AVAILABLE_AREAS, &params, "window")
            .await?;
        Ok(resp.into())
    }
}
