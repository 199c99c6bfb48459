//! The `search` command: resolve an origin, fetch nearby chargers, filter,
//! optionally sort, classify and print.

use chargenear_core::{
    sort_by_distance, AppConfig, ChargerFilterEngine, ChargerRecord, ClassifiedCharger,
    Coordinates, FilterCriteria,
};
use chargenear_ocm::{ChargerQuery, EndpointMode, OcmClient};
use clap::Args;

use crate::origin::{geocode_client, resolve_origin, Origin, OriginRequest};
use crate::output;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Address to search around ("current location" or empty uses the default origin)
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub address: Option<String>,
    /// Origin latitude (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Origin longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
    /// Search radius in miles (defaults to CHARGENEAR_SEARCH_DISTANCE_MILES)
    #[arg(long)]
    pub distance: Option<f64>,
    /// Maximum records requested from the provider
    #[arg(long)]
    pub max_results: Option<u32>,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Sort results nearest first
    #[arg(long)]
    pub sort_by_distance: bool,
    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Filter flags. Selecting several keeps chargers matching any of them.
#[derive(Debug, Clone, Copy, Default, Args)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct FilterArgs {
    /// DC fast charging (Level 3)
    #[arg(long)]
    pub fast_only: bool,
    /// Level 2 charging
    #[arg(long)]
    pub level2_only: bool,
    #[arg(long)]
    pub tesla_supercharger: bool,
    #[arg(long)]
    pub tesla_destination: bool,
    #[arg(long)]
    pub chargepoint: bool,
    #[arg(long)]
    pub electrify_america: bool,
    #[arg(long)]
    pub evgo: bool,
    #[arg(long)]
    pub blink: bool,
    /// At least 150 kW
    #[arg(long)]
    pub high_power: bool,
    /// 50 to 150 kW
    #[arg(long)]
    pub medium_power: bool,
    /// Under 50 kW
    #[arg(long)]
    pub low_power: bool,
    /// Keep chargers whose status is not "Operational"
    #[arg(long)]
    pub include_non_operational: bool,
}

impl FilterArgs {
    pub(crate) fn to_criteria(self) -> FilterCriteria {
        FilterCriteria {
            fast_only: self.fast_only,
            level2_only: self.level2_only,
            tesla_supercharger: self.tesla_supercharger,
            tesla_destination: self.tesla_destination,
            chargepoint_only: self.chargepoint,
            electrify_america: self.electrify_america,
            evgo: self.evgo,
            blink: self.blink,
            operational_only: !self.include_non_operational,
            high_power: self.high_power,
            medium_power: self.medium_power,
            low_power: self.low_power,
        }
    }
}

impl SearchArgs {
    /// # Errors
    ///
    /// Returns an error when `--lat`/`--lon` are out of range.
    pub(crate) fn origin_request(&self) -> anyhow::Result<OriginRequest> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                let origin = Coordinates::new(lat, lon)?;
                Ok(OriginRequest::Coordinates(origin))
            }
            _ => Ok(OriginRequest::from_address(self.address.as_deref())),
        }
    }
}

/// Result of a search, ready for printing.
#[derive(Debug)]
pub(crate) struct SearchOutcome {
    pub origin: Origin,
    pub results: Vec<ClassifiedCharger>,
}

pub(crate) fn ocm_client(config: &AppConfig) -> anyhow::Result<OcmClient> {
    let (api_key, mode) = if config.ocm_passthrough {
        (None, EndpointMode::Passthrough)
    } else {
        (config.ocm_api_key.as_deref(), EndpointMode::OpenChargeMap)
    };
    let client = OcmClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.ocm_base_url,
        mode,
    )
    .map_err(|e| anyhow::anyhow!("failed to build charger client: {e}"))?;
    Ok(client.with_retry(config.max_retries, config.retry_backoff_base_ms))
}

/// Runs the full search without printing anything.
///
/// # Errors
///
/// Returns an error if the origin cannot be resolved, the search radius is
/// invalid, or the charger fetch fails. Zero matches is not an error.
pub(crate) async fn search_chargers(
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<SearchOutcome> {
    let distance_miles = args.distance.unwrap_or(config.search_distance_miles);
    if !(distance_miles.is_finite() && distance_miles > 0.0) {
        anyhow::bail!("--distance must be positive, got {distance_miles}");
    }
    let max_results = args.max_results.unwrap_or(config.max_results);
    if max_results == 0 {
        anyhow::bail!("--max-results must be greater than zero");
    }

    let geocoder = geocode_client(config)?;
    let origin = resolve_origin(
        args.origin_request()?,
        &geocoder,
        Origin::default_from(config),
    )
    .await?;

    let query = ChargerQuery {
        origin: origin.coordinates,
        distance_miles,
        max_results,
    };
    let chargers = ocm_client(config)?
        .fetch_chargers(&query)
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch chargers: {e}"))?;

    let results = select(
        chargers,
        origin.coordinates,
        args.filters.to_criteria(),
        args.sort_by_distance,
    );
    tracing::info!(origin = %origin.label, matched = results.len(), "search complete");

    Ok(SearchOutcome { origin, results })
}

/// Filters, optionally sorts, then classifies.
///
/// Records the provider returned without a distance get one computed from
/// `origin`, so sorting never has to push them to the end. Both endpoint
/// modes request miles, so provider and computed distances share a unit.
pub(crate) fn select(
    chargers: Vec<ChargerRecord>,
    origin: Coordinates,
    criteria: FilterCriteria,
    sort: bool,
) -> Vec<ClassifiedCharger> {
    let mut kept = ChargerFilterEngine::new(criteria).filter(chargers);
    for charger in &mut kept {
        if charger.address.distance.is_none() {
            let here = charger.address.coordinates();
            charger.address.distance = Some(origin.distance_miles(&here));
        }
    }
    if sort {
        sort_by_distance(&mut kept);
    }
    kept.into_iter()
        .map(|charger| ClassifiedCharger {
            display_class: ChargerFilterEngine::classify(&charger),
            charger,
        })
        .collect()
}

/// Handler for `search`.
///
/// # Errors
///
/// Returns an error if the search fails; see [`search_chargers`].
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let outcome = search_chargers(config, args).await?;

    if args.json {
        println!("{}", output::render_json(&outcome.results)?);
        return Ok(());
    }

    let origin = &outcome.origin;
    println!("Chargers near {} ({})", origin.label, origin.coordinates);
    if outcome.results.is_empty() {
        println!("no chargers found");
        return Ok(());
    }
    for line in output::render_table(&outcome.results) {
        println!("{line}");
    }
    Ok(())
}
