//! HTTP client for Mapbox forward geocoding.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::{FeatureCollection, Place};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";

/// Shorter queries produce noise, so [`GeocodeClient::suggest`] skips them.
pub const MIN_SUGGEST_QUERY_CHARS: usize = 3;
pub const SUGGESTION_LIMIT: u32 = 5;

/// Client for the `geocoding/v5/mapbox.places` endpoint.
pub struct GeocodeClient {
    client: Client,
    token: Option<String>,
    base_url: Url,
}

impl GeocodeClient {
    /// Creates a client pointed at the public Mapbox API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (used by tests against a mock
    /// server).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.map(str::to_owned),
            base_url: parsed,
        })
    }

    /// Resolves a free-text address to the best-matching place.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NotFound`] when the address is blank or the
    ///   geocoder returns no usable feature.
    /// - [`GeocodeError::MissingToken`] when no access token is configured.
    /// - [`GeocodeError::UnexpectedStatus`], [`GeocodeError::Http`] or
    ///   [`GeocodeError::Deserialize`] when the request itself fails.
    pub async fn geocode(&self, address: &str) -> Result<Place, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::NotFound {
                query: address.to_owned(),
            });
        }

        let url = self.build_url(address, &[("limit", "1")])?;
        let places = self.request_places(url).await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound {
                query: address.to_owned(),
            })?;

        tracing::debug!(
            address,
            lat = place.coordinates.lat,
            lon = place.coordinates.lon,
            "address geocoded"
        );
        Ok(place)
    }

    /// Returns up to [`SUGGESTION_LIMIT`] autocomplete suggestions.
    ///
    /// Queries shorter than [`MIN_SUGGEST_QUERY_CHARS`] return an empty list
    /// without a request.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::MissingToken`] when no access token is
    /// configured, or a transport error when the request fails. An empty
    /// match list is `Ok(vec![])`.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGEST_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let limit = SUGGESTION_LIMIT.to_string();
        let url = self.build_url(query, &[("autocomplete", "true"), ("limit", &limit)])?;
        let places = self.request_places(url).await?;
        tracing::debug!(query, count = places.len(), "suggestions fetched");
        Ok(places)
    }

    fn build_url(&self, query: &str, extra: &[(&str, &str)]) -> Result<Url, GeocodeError> {
        let token = self.token.as_deref().ok_or(GeocodeError::MissingToken)?;
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        let path = format!("geocoding/v5/mapbox.places/{encoded}.json");
        let joined = self.base_url.join(&path);
        let mut url = joined.map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: self.base_url.to_string(),
            reason: e.to_string(),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", token);
            for (key, value) in extra {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn request_places(&self, url: Url) -> Result<Vec<Place>, GeocodeError> {
        let endpoint = endpoint_label(&url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<FeatureCollection>(&body);
        let collection = parsed.map_err(|e| GeocodeError::Deserialize {
            context: endpoint,
            source: e,
        })?;

        Ok(collection
            .features
            .into_iter()
            .filter_map(crate::types::Feature::into_place)
            .collect())
    }
}

/// Strips the query so the access token stays out of logs and errors.
fn endpoint_label(url: &Url) -> String {
    let mut bare = url.clone();
    bare.set_query(None);
    bare.to_string()
}
