use thiserror::Error;

/// Errors returned by the charger-data client.
///
/// Every variant means the fetch failed. An empty result is never reported
/// as an error, and an error is never reported as an empty result.
#[derive(Debug, Error)]
pub enum OcmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was valid JSON but neither a POI array nor a `{"chargers": [...]}` envelope.
    #[error("unexpected response shape from {endpoint}: {detail}")]
    UnexpectedShape { endpoint: String, detail: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
