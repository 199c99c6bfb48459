use crate::geo::Coordinates;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub ocm_api_key: Option<String>,
    pub ocm_base_url: String,
    /// When set, `ocm_base_url` is an API-Gateway passthrough that takes the
    /// query parameters directly and needs no key.
    pub ocm_passthrough: bool,
    pub mapbox_token: Option<String>,
    pub mapbox_base_url: String,
    pub search_distance_miles: f64,
    pub max_results: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub default_origin: Coordinates,
    pub default_address: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "ocm_api_key",
                &self.ocm_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("ocm_base_url", &self.ocm_base_url)
            .field("ocm_passthrough", &self.ocm_passthrough)
            .field(
                "mapbox_token",
                &self.mapbox_token.as_ref().map(|_| "[redacted]"),
            )
            .field("mapbox_base_url", &self.mapbox_base_url)
            .field("search_distance_miles", &self.search_distance_miles)
            .field("max_results", &self.max_results)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("default_origin", &self.default_origin)
            .field("default_address", &self.default_address)
            .finish()
    }
}
