use chargenear_core::{AppConfig, ChargerRecord, ClassifiedCharger, Coordinates};
use chargenear_core::{DisplayClass, FilterCriteria};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::origin::{resolve_origin, Origin, OriginRequest};
use crate::search::{search_chargers, select};

fn try_search(args: &[&str]) -> Result<Cli, clap::Error> {
    let mut argv = vec!["chargenear", "search"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
}

fn parse_search(args: &[&str]) -> SearchArgs {
    let cli = try_search(args).expect("expected valid cli args");
    match cli.command {
        Commands::Search(search) => search,
        other => panic!("expected search, got {other:?}"),
    }
}

fn test_config(ocm_base_url: &str, mapbox_base_url: &str) -> AppConfig {
    AppConfig {
        log_level: "debug".to_string(),
        ocm_api_key: Some("ocm-key".to_string()),
        ocm_base_url: ocm_base_url.to_string(),
        ocm_passthrough: false,
        mapbox_token: Some("pk.test".to_string()),
        mapbox_base_url: mapbox_base_url.to_string(),
        search_distance_miles: 100.0,
        max_results: 100,
        request_timeout_secs: 5,
        user_agent: "chargenear-test".to_string(),
        max_retries: 0,
        retry_backoff_base_ms: 0,
        default_origin: Coordinates::new(47.629_052_5, -122.375_890_9).unwrap(),
        default_address: "1111 Expedia Group Wy W, Seattle, WA 98119".to_string(),
    }
}

fn poi(
    id: i64,
    operator: &str,
    status: &str,
    level: u8,
    kw: f64,
    distance: Option<f64>,
) -> serde_json::Value {
    let mut address = serde_json::json!({
        "Title": format!("Station {id}"),
        "Town": "Seattle",
        "Latitude": 47.6,
        "Longitude": -122.3
    });
    if let Some(d) = distance {
        address["Distance"] = serde_json::json!(d);
    }
    serde_json::json!({
        "ID": id,
        "AddressInfo": address,
        "OperatorInfo": { "Title": operator },
        "StatusType": { "Title": status },
        "Connections": [ { "LevelID": level, "PowerKW": kw } ]
    })
}

fn record(value: serde_json::Value) -> ChargerRecord {
    let poi = serde_json::from_value(value).expect("fixture is a valid POI");
    chargenear_ocm::normalize_poi(poi).expect("fixture has coordinates")
}

fn ids(results: &[ClassifiedCharger]) -> Vec<String> {
    results.iter().map(|r| r.charger.id.to_string()).collect()
}

// --- argument parsing ---

#[test]
fn parses_search_with_no_flags() {
    let args = parse_search(&[]);
    assert!(args.address.is_none());
    assert!(!args.sort_by_distance);
    assert!(!args.json);
    assert_eq!(args.filters.to_criteria(), FilterCriteria::default());
}

#[test]
fn parses_search_with_filter_flags() {
    let args = parse_search(&[
        "--address",
        "Pike Place Market",
        "--fast-only",
        "--chargepoint",
        "--high-power",
        "--sort-by-distance",
    ]);
    assert_eq!(args.address.as_deref(), Some("Pike Place Market"));
    assert!(args.sort_by_distance);
    let criteria = args.filters.to_criteria();
    assert!(criteria.fast_only);
    assert!(criteria.chargepoint_only);
    assert!(criteria.high_power);
    assert!(criteria.operational_only);
    assert!(!criteria.evgo);
}

#[test]
fn include_non_operational_turns_off_the_gate() {
    let args = parse_search(&["--include-non-operational"]);
    assert!(!args.filters.to_criteria().operational_only);
}

#[test]
fn parses_negative_longitude() {
    let args = parse_search(&["--lat", "47.6", "--lon", "-122.3"]);
    assert_eq!(
        args.origin_request().unwrap(),
        OriginRequest::Coordinates(Coordinates::new(47.6, -122.3).unwrap())
    );
}

#[test]
fn lat_without_lon_is_rejected() {
    assert!(try_search(&["--lat", "47.6"]).is_err());
}

#[test]
fn address_conflicts_with_coordinates() {
    let result = try_search(&["--address", "SLU", "--lat", "47.6", "--lon", "-122.3"]);
    assert!(result.is_err());
}

#[test]
fn out_of_range_coordinates_are_an_error() {
    let args = parse_search(&["--lat", "95", "--lon", "0"]);
    assert!(args.origin_request().is_err());
}

#[test]
fn parses_suggest_and_geocode() {
    let cli = Cli::try_parse_from(["chargenear", "suggest", "Seat"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Suggest { ref query } if query == "Seat"
    ));

    let argv = ["chargenear", "geocode", "Space Needle"];
    let cli = Cli::try_parse_from(argv).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Geocode { ref address } if address == "Space Needle"
    ));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["chargenear"]).is_err());
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = Cli::try_parse_from(["chargenear", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

// --- origin requests ---

#[test]
fn blank_and_current_location_use_default_origin() {
    let from = OriginRequest::from_address;
    assert_eq!(from(None), OriginRequest::CurrentLocation);
    assert_eq!(from(Some("  ")), OriginRequest::CurrentLocation);
    assert_eq!(
        from(Some("Current Location")),
        OriginRequest::CurrentLocation
    );
    assert_eq!(
        from(Some(" Ballard ")),
        OriginRequest::Address("Ballard".to_string())
    );
}

#[tokio::test]
async fn unknown_address_falls_back_to_default_origin() {
    let mapbox = MockServer::start().await;
    let no_features = serde_json::json!({ "features": [] });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_features))
        .expect(1)
        .mount(&mapbox)
        .await;

    let config = test_config("http://unused.invalid", &mapbox.uri());
    let geocoder = crate::origin::geocode_client(&config).unwrap();
    let origin = resolve_origin(
        OriginRequest::Address("qwertyuiop".to_string()),
        &geocoder,
        Origin::default_from(&config),
    )
    .await
    .unwrap();
    assert_eq!(origin, Origin::default_from(&config));
}

#[tokio::test]
async fn geocoding_failure_is_surfaced() {
    let mapbox = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mapbox)
        .await;

    let config = test_config("http://unused.invalid", &mapbox.uri());
    let geocoder = crate::origin::geocode_client(&config).unwrap();
    let result = resolve_origin(
        OriginRequest::Address("Seattle".to_string()),
        &geocoder,
        Origin::default_from(&config),
    )
    .await;
    assert!(result.is_err(), "fetch errors must not fall back silently");
}

// --- select ---

#[test]
fn select_fills_missing_distance_and_sorts() {
    let chargers = vec![
        record(poi(1, "EVgo", "Operational", 3, 100.0, Some(12.0))),
        record(poi(2, "EVgo", "Operational", 3, 350.0, None)),
        record(poi(3, "EVgo", "Operational", 2, 7.2, Some(0.5))),
    ];

    let origin = Coordinates::new(47.6, -122.31).unwrap();
    let results = select(chargers, origin, FilterCriteria::default(), true);
    // Station 2 is about half a mile from the origin.
    assert_eq!(ids(&results), vec!["2", "3", "1"]);
    assert_eq!(results[0].display_class, DisplayClass::OperationalHighPower);
    assert_eq!(results[1].display_class, DisplayClass::OperationalStandard);
}

// --- full search flow ---

#[tokio::test]
async fn search_geocodes_fetches_and_filters() {
    let mapbox = MockServer::start().await;
    let places = serde_json::json!({
        "features": [ { "place_name": "Ballard, Seattle", "center": [-122.3860, 47.6677] } ]
    });
    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Ballard.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places))
        .expect(1)
        .mount(&mapbox)
        .await;

    let ocm = MockServer::start().await;
    let pois = serde_json::json!([
        poi(1, "ChargePoint", "Operational", 2, 6.6, Some(3.0)),
        poi(2, "Blink Charging", "Operational", 2, 7.0, Some(1.0)),
        poi(3, "ChargePoint", "Faulted", 2, 6.6, Some(0.2)),
    ]);
    Mock::given(method("GET"))
        .and(path("/poi/"))
        .and(query_param("latitude", "47.6677"))
        .and(query_param("longitude", "-122.386"))
        .and(query_param("distance", "25"))
        .and(query_param("key", "ocm-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pois))
        .expect(1)
        .mount(&ocm)
        .await;

    let config = test_config(&ocm.uri(), &mapbox.uri());
    let args = parse_search(&[
        "--address",
        "Ballard",
        "--distance",
        "25",
        "--chargepoint",
    ]);
    let outcome = search_chargers(&config, &args).await.unwrap();

    assert_eq!(outcome.origin.label, "Ballard, Seattle");
    assert_eq!(ids(&outcome.results), vec!["1"]);
}

#[tokio::test]
async fn search_with_no_matches_is_empty_success() {
    let ocm = MockServer::start().await;
    let empty = serde_json::json!([]);
    Mock::given(method("GET"))
        .and(path("/poi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty))
        .mount(&ocm)
        .await;

    let config = test_config(&ocm.uri(), "http://unused.invalid");
    let args = parse_search(&[]);
    let outcome = search_chargers(&config, &args).await.unwrap();
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.origin, Origin::default_from(&config));
}

#[tokio::test]
async fn search_fetch_failure_is_an_error() {
    let ocm = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&ocm)
        .await;

    let config = test_config(&ocm.uri(), "http://unused.invalid");
    let args = parse_search(&["--lat", "47.6", "--lon", "-122.3"]);
    assert!(search_chargers(&config, &args).await.is_err());
}

#[tokio::test]
async fn search_rejects_non_positive_distance() {
    let config = test_config("http://unused.invalid", "http://unused.invalid");
    let args = parse_search(&["--distance", "0"]);
    assert!(search_chargers(&config, &args).await.is_err());
}
