use std::sync::Arc;
use std::time::Duration;

use nimbus::geo::{
    FreeGeoIpLocator, GeoError, LocationProvider, LocationResolver, ResolveError, RetryPolicy,
};
use nimbus::weather::{OpenWeatherMapProvider, WeatherError, WeatherProvider};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const TIMEOUT: Duration = Duration::from_secs(5);

fn geo_body() -> &'static str {
    r#"{
        "ip": "203.0.113.7",
        "country_code": "US",
        "country_name": "United States",
        "region_code": "CA",
        "region_name": "California",
        "city": "San Francisco",
        "zip_code": "94107",
        "time_zone": "America/Los_Angeles",
        "latitude": 37.7,
        "longitude": -122.4,
        "metro_code": 807
    }"#
}

fn weather_body() -> &'static str {
    r#"{
        "coord": {"lon": -122.4, "lat": 37.7},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 289.15, "feels_like": 288.5, "pressure": 1012, "humidity": 77},
        "wind": {"speed": 5.1, "deg": 240},
        "name": "San Francisco",
        "cod": 200
    }"#
}

fn weather_provider(server: &MockServer) -> OpenWeatherMapProvider {
    OpenWeatherMapProvider::new("test-key".to_string(), server.uri(), TIMEOUT).unwrap()
}

fn locator(server: &MockServer) -> FreeGeoIpLocator {
    FreeGeoIpLocator::new(format!("{}/json/", server.uri()), TIMEOUT).unwrap()
}

// ============================================================================
// OpenWeatherMap Provider Tests
// ============================================================================

#[tokio::test]
async fn test_openweathermap_current_weather() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "37.7"))
        .and(query_param("lon", "-122.4"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "standard"))
        .respond_with(ResponseTemplate::new(200).set_body_string(weather_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let observation = weather_provider(&mock_server)
        .current_weather(37.7, -122.4)
        .await
        .unwrap();

    assert_eq!(observation.status, "light rain");
    assert_eq!(observation.temperature_kelvin, 289.15);
    assert_eq!(observation.wind_speed, 5.1);
    assert_eq!(observation.humidity, 77);
}

#[tokio::test]
async fn test_openweathermap_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"cod":401,"message":"Invalid API key."}"#),
        )
        .mount(&mock_server)
        .await;

    let result = weather_provider(&mock_server).current_weather(0.0, 0.0).await;

    match result {
        Err(WeatherError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_openweathermap_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"cod":200}"#))
        .mount(&mock_server)
        .await;

    let result = weather_provider(&mock_server).current_weather(0.0, 0.0).await;
    assert!(matches!(result, Err(WeatherError::Parse(_))));
}

#[tokio::test]
async fn test_openweathermap_connection_refused() {
    // Nothing listens on port 9 locally
    let provider =
        OpenWeatherMapProvider::new("key".to_string(), "http://127.0.0.1:9".to_string(), TIMEOUT)
            .unwrap();
    let result = provider.current_weather(0.0, 0.0).await;
    assert!(matches!(result, Err(WeatherError::Network(_))));
}

// ============================================================================
// Geolocation Provider Tests
// ============================================================================

#[tokio::test]
async fn test_freegeoip_locate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(geo_body()))
        .mount(&mock_server)
        .await;

    let location = locator(&mock_server).locate().await.unwrap();

    assert_eq!(location.display_name(), "San Francisco, California");
    assert_eq!(location.ip, "203.0.113.7");
    assert_eq!(location.latitude, 37.7);
    assert_eq!(location.longitude, -122.4);

    // The verbose line shows the whole payload, not just the parsed fields
    let diagnostic = location.diagnostic_json();
    assert!(diagnostic.contains("\"zip_code\":\"94107\""));
    assert!(diagnostic.contains("\"time_zone\":\"America/Los_Angeles\""));
    assert!(diagnostic.contains("\"country_name\":\"United States\""));
    assert!(!diagnostic.contains('\n'));
}

#[tokio::test]
async fn test_freegeoip_bad_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&mock_server)
        .await;

    let result = locator(&mock_server).locate().await;
    assert!(matches!(result, Err(GeoError::Parse(_))));
}

#[tokio::test]
async fn test_freegeoip_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    match locator(&mock_server).locate().await {
        Err(GeoError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

// ============================================================================
// Resolver Tests
// ============================================================================

#[tokio::test]
async fn test_resolver_retries_until_provider_recovers() {
    let mock_server = MockServer::start().await;

    // Mounted first, so it answers the first two requests
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(geo_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = LocationResolver::new(
        Arc::new(locator(&mock_server)),
        RetryPolicy::unbounded(Duration::from_millis(5)),
    );
    let location = resolver.resolve(std::future::pending()).await.unwrap();

    assert_eq!(location.city, "San Francisco");
}

#[tokio::test]
async fn test_resolver_retries_garbled_payloads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(geo_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = LocationResolver::new(Arc::new(locator(&mock_server)), RetryPolicy::default());
    let location = resolver.resolve(std::future::pending()).await.unwrap();

    assert_eq!(location.ip, "203.0.113.7");
}

#[tokio::test]
async fn test_resolver_bounded_policy_gives_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let resolver = LocationResolver::new(
        Arc::new(locator(&mock_server)),
        RetryPolicy::bounded(3, Duration::ZERO),
    );
    let result = resolver.resolve(std::future::pending()).await;

    match result {
        Err(ResolveError::Exhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(last, GeoError::Api { status: 500, .. }));
        }
        other => panic!("Expected Exhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolver_cancelled_while_waiting() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&mock_server)
        .await;

    let resolver = LocationResolver::new(Arc::new(locator(&mock_server)), RetryPolicy::default());
    let result = resolver
        .resolve(tokio::time::sleep(Duration::from_millis(50)))
        .await;

    assert!(matches!(result, Err(ResolveError::Cancelled)));
}
