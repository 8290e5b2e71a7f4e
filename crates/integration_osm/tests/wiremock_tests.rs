//! Integration tests for the OSM clients (wiremock-based)

use std::sync::Arc;

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain::value_objects::{Coordinate, ElementId, ElementKind, SearchRadius, TagFilterSet};
use integration_osm::{
    GeocodingClient, NominatimConfig, NominatimGeocodingClient, OsmError, OverpassConfig,
    OverpassPlaceClient, PlaceSearchClient, QueryBuilder, RateLimiter, ResilientFetcher,
};

fn nominatim_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn overpass_for_mock(endpoints: &[&MockServer]) -> OverpassConfig {
    OverpassConfig {
        endpoints: endpoints
            .iter()
            .map(|server| format!("{}/api/interpreter", server.uri()))
            .collect(),
        ..OverpassConfig::for_testing()
    }
}

fn unlimited() -> Arc<RateLimiter> {
    Arc::new(RateLimiter::unlimited())
}

const fn sample_geocode_json() -> &'static str {
    r#"[{"place_id": 1, "lat": "40.7128", "lon": "-74.0060", "display_name": "123 Main St, New York"}]"#
}

const fn sample_overpass_json() -> &'static str {
    r#"{
        "version": 0.6,
        "generator": "Overpass API",
        "elements": [
            {
                "type": "way",
                "id": 5,
                "center": { "lat": 40.7130, "lon": -74.0058 },
                "nodes": [11, 12],
                "tags": { "name": "St. Mary's", "amenity": "place_of_worship", "denomination": "catholic" }
            },
            { "type": "node", "id": 11, "lat": 40.71301, "lon": -74.00581 },
            { "type": "node", "id": 12, "lat": 40.71299, "lon": -74.00579 }
        ]
    }"#
}

// ==============================
// Geocoding
// ==============================

#[tokio::test]
async fn test_geocode_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "123 Main St"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "Catholic-Church-Map/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_geocode_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let coord = client.geocode("123 Main St").await.unwrap();

    assert!((coord.latitude() - 40.7128).abs() < 1e-9);
    assert!((coord.longitude() - -74.006).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_sends_optional_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("countrycodes", "us"))
        .and(query_param("accept-language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_geocode_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        country_filter: "us".to_string(),
        accept_language: "en".to_string(),
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();

    assert!(client.geocode("123 Main St").await.is_ok());
}

#[tokio::test]
async fn test_geocode_empty_result_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.geocode("Nowhere Lane 0").await.unwrap_err();

    assert!(matches!(err, OsmError::NotFound(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_geocode_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.geocode("123 Main St").await.unwrap_err();

    assert_eq!(
        err,
        OsmError::RateLimited {
            retry_after_secs: Some(30)
        }
    );
}

#[tokio::test]
async fn test_geocode_service_unavailable_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.geocode("123 Main St").await.unwrap_err();

    assert_eq!(err, OsmError::ServiceUnavailable { status: 503 });
}

#[tokio::test]
async fn test_geocode_bad_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.geocode("123 Main St").await.unwrap_err();

    assert!(matches!(err, OsmError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_geocode_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error": "oops"}"#))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.geocode("123 Main St").await.unwrap_err();

    assert!(matches!(err, OsmError::InvalidResponse(_)));
}

// ==============================
// Spatial query
// ==============================

#[tokio::test]
async fn test_query_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("data=%5Bout%3Ajson%5D%5Btimeout%3A25%5D"))
        .and(body_string_contains("around%3A1000%2C40.7128%2C-74.006"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"elements": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = OverpassPlaceClient::new(&overpass_for_mock(&[&server]), unlimited()).unwrap();
    let places = client
        .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
        .await
        .unwrap();

    assert!(places.is_empty());
}

#[tokio::test]
async fn test_failover_to_backup() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&primary)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_overpass_json()))
        .expect(1)
        .mount(&backup)
        .await;

    let client =
        OverpassPlaceClient::new(&overpass_for_mock(&[&primary, &backup]), unlimited()).unwrap();
    let places = client
        .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
        .await
        .unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name(), "St. Mary's");
}

#[tokio::test]
async fn test_retry_exhaustion_calls_each_endpoint_per_attempt() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&primary)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&backup)
        .await;

    let config = overpass_for_mock(&[&primary, &backup]);
    let fetcher = ResilientFetcher::from_config(&config, unlimited()).unwrap();
    let query = QueryBuilder::from_config(&config).build(
        &Coordinate::new(40.7128, -74.006).unwrap(),
        1000,
        &TagFilterSet::default(),
    );

    let report = fetcher.fetch_with_report(&query).await;

    assert_eq!(report.attempts, 3);
    assert_eq!(report.endpoint_calls, 6);
    assert_eq!(
        report.result.unwrap_err(),
        OsmError::ServiceUnavailable { status: 502 }
    );
}

#[tokio::test]
async fn test_bad_request_short_circuits() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("parse error: line 1"))
        .expect(1)
        .mount(&primary)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_overpass_json()))
        .expect(0)
        .mount(&backup)
        .await;

    let client =
        OverpassPlaceClient::new(&overpass_for_mock(&[&primary, &backup]), unlimited()).unwrap();
    let err = client
        .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
        .await
        .unwrap_err();

    assert!(matches!(err, OsmError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_gateway_timeout_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(504))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_overpass_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OverpassPlaceClient::new(&overpass_for_mock(&[&server]), unlimited()).unwrap();
    let places = client
        .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
        .await
        .unwrap();

    assert_eq!(places.len(), 1);
}

#[tokio::test]
async fn test_html_body_is_invalid_response() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Dispatcher busy</html>"))
        .expect(1)
        .mount(&primary)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_overpass_json()))
        .expect(0)
        .mount(&backup)
        .await;

    let client =
        OverpassPlaceClient::new(&overpass_for_mock(&[&primary, &backup]), unlimited()).unwrap();
    let err = client
        .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
        .await
        .unwrap_err();

    assert!(matches!(err, OsmError::InvalidResponse(_)));
}

// ==============================
// End to end
// ==============================

#[tokio::test]
async fn test_address_to_place() {
    let nominatim = MockServer::start().await;
    let overpass = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "123 Main St"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_geocode_json()))
        .expect(1)
        .mount(&nominatim)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("around%3A1000%2C40.7128%2C-74.006"))
        .and(body_string_contains(concat!(
            "way%5B%22amenity%22%3D%22place_of_worship%22%5D",
            "%5B%22religion%22%3D%22christian%22%5D",
            "%5B%22denomination%22%3D%22catholic%22%5D",
        )))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "elements": [
                    {
                        "id": 5,
                        "type": "way",
                        "center": { "lat": 40.7130, "lon": -74.0058 },
                        "tags": { "name": "St. Mary's", "denomination": "Roman Catholic" }
                    }
                ]
            }"#,
        ))
        .expect(1)
        .mount(&overpass)
        .await;

    let geocoder = NominatimGeocodingClient::new(&nominatim_for_mock(&nominatim.uri()))
        .unwrap()
        .with_rate_limiter(unlimited());
    let places_client =
        OverpassPlaceClient::new(&overpass_for_mock(&[&overpass]), unlimited()).unwrap();
    let filters = TagFilterSet::from_pairs([
        ("amenity", "place_of_worship"),
        ("religion", "christian"),
        ("denomination", "catholic"),
    ])
    .unwrap();

    let center = geocoder.geocode("123 Main St").await.unwrap();
    assert_eq!(center, Coordinate::new(40.7128, -74.006).unwrap());

    let places = places_client
        .find_places(&center, SearchRadius::new(1000), &filters)
        .await
        .unwrap();

    assert_eq!(places.len(), 1);
    let place = &places[0];
    assert_eq!(place.id(), ElementId::new(ElementKind::Way, 5));
    assert_eq!(place.name(), "St. Mary's");
    assert_eq!(place.denomination(), "Roman Catholic");
    assert_eq!(place.address(), "Address not available");
    assert!((place.coordinate().latitude() - 40.713).abs() < 1e-9);
    assert!((place.coordinate().longitude() - -74.0058).abs() < 1e-9);
}
