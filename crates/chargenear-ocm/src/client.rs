//! HTTP client for the OpenChargeMap `poi` endpoint.
//!
//! Wraps `reqwest` with query construction, typed errors, retry on transient
//! failures, and normalization of the PascalCase wire records into
//! [`ChargerRecord`]s. The same client speaks to an API-Gateway passthrough
//! that forwards the query to OpenChargeMap and returns its JSON unchanged.

use std::collections::BTreeSet;
use std::time::Duration;

use chargenear_core::{ChargerRecord, Coordinates};
use reqwest::{Client, Url};

use crate::error::OcmError;
use crate::normalize::normalize_poi;
use crate::retry::retry_with_backoff;
use crate::types::OcmPoi;

const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3/";

/// Which request shape the base URL expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMode {
    /// `GET {base}poi/?output=json&...&distanceunit=Miles&key=...`
    OpenChargeMap,
    /// `GET {base}?latitude=...&distance=...&distanceunit=Miles&maxresults=...`,
    /// no key; the gateway holds it.
    Passthrough,
}

/// Parameters of a single "chargers near here" request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargerQuery {
    pub origin: Coordinates,
    pub distance_miles: f64,
    pub max_results: u32,
}

/// Client for the charger-data provider.
///
/// Use [`OcmClient::new`] for the public OpenChargeMap API or
/// [`OcmClient::with_base_url`] for a passthrough or a mock server.
pub struct OcmClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    mode: EndpointMode,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl OcmClient {
    /// Creates a client pointed at the public OpenChargeMap API.
    ///
    /// # Errors
    ///
    /// Returns [`OcmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OcmError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
            EndpointMode::OpenChargeMap,
        )
    }

    /// Creates a client with a custom base URL and endpoint mode.
    ///
    /// Retries default to off; see [`OcmClient::with_retry`].
    ///
    /// # Errors
    ///
    /// Returns [`OcmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`OcmError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
        mode: EndpointMode,
    ) -> Result<Self, OcmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so that `join("poi/")` appends rather
        // than replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| OcmError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            base_url: parsed,
            mode,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retry on transient failures (timeouts, connect errors, 429, 5xx).
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn mode(&self) -> EndpointMode {
        self.mode
    }

    /// Fetches the chargers around `query.origin`.
    ///
    /// Records that fail to deserialize or have no coordinates are skipped.
    /// Provider order is preserved.
    ///
    /// # Errors
    ///
    /// - [`OcmError::UnexpectedStatus`] on a non-2xx response (429 and 5xx
    ///   are retried first).
    /// - [`OcmError::Http`] on network failure after retries.
    /// - [`OcmError::Deserialize`] if the body is not JSON.
    /// - [`OcmError::UnexpectedShape`] if the JSON is not a POI list.
    pub async fn fetch_chargers(
        &self,
        query: &ChargerQuery,
    ) -> Result<Vec<ChargerRecord>, OcmError> {
        let url = self.build_url(query)?;
        let endpoint = endpoint_label(&url);

        tracing::debug!(
            endpoint,
            lat = query.origin.lat,
            lon = query.origin.lon,
            distance_miles = query.distance_miles,
            max_results = query.max_results,
            "fetching chargers"
        );

        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.request_json(url).await }
        })
        .await?;

        let raw = extract_pois(body, &endpoint)?;
        let total = raw.len();
        let chargers: Vec<ChargerRecord> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<OcmPoi>(value) {
                Ok(poi) => Some(poi),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed POI");
                    None
                }
            })
            .filter_map(normalize_poi)
            .collect();

        let operators: BTreeSet<&str> = chargers
            .iter()
            .filter_map(ChargerRecord::operator_title)
            .collect();
        tracing::debug!(?operators, "operators present in response");
        tracing::info!(fetched = total, usable = chargers.len(), "fetched chargers");

        Ok(chargers)
    }

    /// Builds the request URL with percent-encoded query parameters.
    ///
    /// Both modes ask for miles so that provider distances and locally
    /// computed ones share a unit.
    fn build_url(&self, query: &ChargerQuery) -> Result<Url, OcmError> {
        let mut url = match self.mode {
            EndpointMode::OpenChargeMap => self.poi_url()?,
            EndpointMode::Passthrough => self.base_url.clone(),
        };
        {
            let mut pairs = url.query_pairs_mut();
            if self.mode == EndpointMode::OpenChargeMap {
                pairs.append_pair("output", "json");
            }
            pairs.append_pair("latitude", &query.origin.lat.to_string());
            pairs.append_pair("longitude", &query.origin.lon.to_string());
            pairs.append_pair("distance", &query.distance_miles.to_string());
            pairs.append_pair("distanceunit", "Miles");
            pairs.append_pair("maxresults", &query.max_results.to_string());
            if self.mode == EndpointMode::OpenChargeMap {
                if let Some(key) = &self.api_key {
                    pairs.append_pair("key", key);
                }
            }
        }
        Ok(url)
    }

    fn poi_url(&self) -> Result<Url, OcmError> {
        let joined = self.base_url.join("poi/");
        joined.map_err(|e| OcmError::InvalidBaseUrl {
            base_url: self.base_url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sends a GET, maps non-2xx to [`OcmError::UnexpectedStatus`], and parses
    /// the body as JSON.
    async fn request_json(&self, url: Url) -> Result<serde_json::Value, OcmError> {
        let endpoint = endpoint_label(&url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcmError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OcmError::Deserialize {
            context: endpoint,
            source: e,
        })
    }
}

/// URL without its query string, so the API key never lands in logs or errors.
fn endpoint_label(url: &Url) -> String {
    let mut bare = url.clone();
    bare.set_query(None);
    bare.to_string()
}

/// OpenChargeMap returns a bare array; some passthrough deployments wrap it
/// as `{"chargers": [...]}`.
fn extract_pois(
    body: serde_json::Value,
    endpoint: &str,
) -> Result<Vec<serde_json::Value>, OcmError> {
    match body {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Object(mut map) => match map.remove("chargers") {
            Some(serde_json::Value::Array(items)) => Ok(items),
            _ => Err(OcmError::UnexpectedShape {
                endpoint: endpoint.to_owned(),
                detail: "object without a \"chargers\" array".to_owned(),
            }),
        },
        other => Err(OcmError::UnexpectedShape {
            endpoint: endpoint.to_owned(),
            detail: format!("expected an array, got {other}"),
        }),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
