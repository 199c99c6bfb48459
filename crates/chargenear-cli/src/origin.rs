//! Resolving where a search is centered, plus the `suggest` and `geocode`
//! command handlers that share the geocoding client.

use chargenear_core::{AppConfig, Coordinates};
use chargenear_geocode::{GeocodeClient, GeocodeError};

/// Typed by users in place of an address to mean "wherever I am".
const CURRENT_LOCATION: &str = "current location";

/// What the user asked the search to be centered on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OriginRequest {
    Coordinates(Coordinates),
    Address(String),
    /// No address, or the literal "current location". Resolves to the
    /// configured default origin.
    CurrentLocation,
}

impl OriginRequest {
    pub(crate) fn from_address(address: Option<&str>) -> Self {
        match address.map(str::trim) {
            None | Some("") => Self::CurrentLocation,
            Some(a) if a.eq_ignore_ascii_case(CURRENT_LOCATION) => Self::CurrentLocation,
            Some(a) => Self::Address(a.to_owned()),
        }
    }
}

/// A resolved search center.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Origin {
    pub coordinates: Coordinates,
    pub label: String,
}

impl Origin {
    pub(crate) fn default_from(config: &AppConfig) -> Self {
        Self {
            coordinates: config.default_origin,
            label: config.default_address.clone(),
        }
    }
}

pub(crate) fn geocode_client(config: &AppConfig) -> anyhow::Result<GeocodeClient> {
    GeocodeClient::with_base_url(
        config.mapbox_token.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        &config.mapbox_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build geocoding client: {e}"))
}

/// Turns an [`OriginRequest`] into coordinates.
///
/// An address the geocoder cannot find falls back to `fallback` with a
/// warning. Any other geocoding failure is returned.
///
/// # Errors
///
/// Returns an error when geocoding fails for a reason other than "no match".
pub(crate) async fn resolve_origin(
    request: OriginRequest,
    geocoder: &GeocodeClient,
    fallback: Origin,
) -> anyhow::Result<Origin> {
    match request {
        OriginRequest::Coordinates(coordinates) => Ok(Origin {
            coordinates,
            label: coordinates.to_string(),
        }),
        OriginRequest::CurrentLocation => {
            tracing::debug!(origin = %fallback.label, "using default origin");
            Ok(fallback)
        }
        OriginRequest::Address(address) => match geocoder.geocode(&address).await {
            Ok(place) => Ok(Origin {
                coordinates: place.coordinates,
                label: place.name,
            }),
            Err(GeocodeError::NotFound { query }) => {
                tracing::warn!(
                    query,
                    fallback = %fallback.label,
                    "address not found; using default origin"
                );
                Ok(fallback)
            }
            Err(e) => Err(anyhow::anyhow!("failed to geocode '{address}': {e}")),
        },
    }
}

/// Print autocomplete suggestions for a partial address.
///
/// # Errors
///
/// Returns an error if the geocoding request fails.
pub(crate) async fn run_suggest(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let geocoder = geocode_client(config)?;
    let places = geocoder
        .suggest(query)
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch suggestions: {e}"))?;

    if places.is_empty() {
        println!("no suggestions for '{query}'");
        return Ok(());
    }
    for place in &places {
        println!("{}  ({})", place.name, place.coordinates);
    }
    Ok(())
}

/// Print the coordinates an address resolves to.
///
/// # Errors
///
/// Returns an error if the address is not found or the request fails.
pub(crate) async fn run_geocode(config: &AppConfig, address: &str) -> anyhow::Result<()> {
    let geocoder = geocode_client(config)?;
    let place = geocoder
        .geocode(address)
        .await
        .map_err(|e| anyhow::anyhow!("failed to geocode '{address}': {e}"))?;
    println!("{}", place.name);
    println!("{}", place.coordinates);
    Ok(())
}
