use crate::helpers::{
    alerts_body, forecast_body, observations_body, point_body, stations_body, test_logger,
    LATITUDE, LONGITUDE,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use nws_adapter::{AdapterConfig, Error, GeoJsonFetcher, GeoJsonSource, WeatherAdapter, GEO_JSON};
use std::{collections::HashMap, time::Duration};
use tokio::net::TcpListener;

const USER_AGENT: &str = "nws-tables-test/1.0 (test@example.com)";

fn geo_json(body: String) -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, GEO_JSON)], body)
}

async fn points(State(base): State<String>, headers: HeaderMap) -> impl IntoResponse {
    let user_agent = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok());
    let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
    if user_agent != Some(USER_AGENT) || accept != Some(GEO_JSON) {
        return (StatusCode::BAD_REQUEST, String::from("missing headers")).into_response();
    }
    geo_json(point_body(&base)).into_response()
}

async fn forecast() -> impl IntoResponse {
    geo_json(forecast_body())
}

async fn stations() -> impl IntoResponse {
    geo_json(stations_body(&["KSFO", "KOAK"]))
}

async fn observations(
    Path(station): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if station != "KSFO" || params.get("limit").map(String::as_str) != Some("3") {
        return (StatusCode::INTERNAL_SERVER_ERROR, String::from("wrong request")).into_response();
    }
    geo_json(observations_body()).into_response()
}

async fn alerts(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("area").map(String::as_str) {
        Some("CA") => geo_json(alerts_body()).into_response(),
        _ => geo_json(String::from(r#"{"features": []}"#)).into_response(),
    }
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    geo_json(String::from("{}"))
}

/// Serves canned api.weather.gov responses on a random local port and
/// returns its base URL.
async fn spawn_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let base = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/points/{coordinates}", get(points))
        .route("/gridpoints/MTR/85,105/forecast", get(forecast))
        .route("/gridpoints/MTR/85,105/stations", get(stations))
        .route("/stations/{station}/observations", get(observations))
        .route("/alerts/active", get(alerts))
        .route("/slow", get(slow))
        .with_state(base.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

fn config(base_url: &str, timeout: Duration) -> AdapterConfig {
    AdapterConfig {
        base_url: base_url.to_string(),
        user_agent: USER_AGENT.to_string(),
        timeout,
    }
}

#[tokio::test]
async fn fetcher_sends_identifying_headers() {
    let base = spawn_upstream().await;
    let fetcher =
        GeoJsonFetcher::new(test_logger(), USER_AGENT, Duration::from_secs(10)).unwrap();

    let body = fetcher
        .fetch_geo_json(&format!("{}/points/{},{}", base, LATITUDE, LONGITUDE))
        .await
        .unwrap();
    assert!(body.contains("\"gridId\": \"MTR\""));
}

#[tokio::test]
async fn fetcher_reports_status() {
    let base = spawn_upstream().await;
    let fetcher = GeoJsonFetcher::new(test_logger(), USER_AGENT, Duration::from_secs(10)).unwrap();

    let err = fetcher
        .fetch_geo_json(&format!("{}/nowhere", base))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {}", err);
}

#[tokio::test]
async fn fetcher_times_out() {
    let base = spawn_upstream().await;
    let fetcher = GeoJsonFetcher::new(test_logger(), USER_AGENT, Duration::from_secs(1)).unwrap();

    let err = fetcher
        .fetch_geo_json(&format!("{}/slow", base))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }), "unexpected error: {}", err);
}

#[tokio::test]
async fn unreachable_upstream_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let adapter =
        WeatherAdapter::new(test_logger(), &config(&base, Duration::from_secs(2))).unwrap();
    let err = adapter.get_alerts("CA").await.unwrap_err();
    assert!(matches!(err, Error::Request { .. }), "unexpected error: {}", err);
}

#[tokio::test]
async fn adapter_end_to_end() {
    let base = spawn_upstream().await;
    let adapter =
        WeatherAdapter::new(test_logger(), &config(&base, Duration::from_secs(10))).unwrap();

    let point = adapter.resolve_point(LATITUDE, LONGITUDE).await.unwrap();
    assert_eq!(point.city.as_deref(), Some("San Francisco"));

    let forecast = adapter
        .get_forecast(LATITUDE, LONGITUDE, false)
        .await
        .unwrap();
    assert_eq!(forecast.len(), 2);

    let observations = adapter
        .get_observations(LATITUDE, LONGITUDE, 3)
        .await
        .unwrap();
    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].station, "KSFO");
    assert_eq!(observations[0].temperature_f, Some(68.0));

    let alerts = adapter.get_alerts("CA").await.unwrap();
    assert_eq!(alerts[0].affected_zones, "Zone1, Zone2");

    let quiet = adapter.get_alerts("RI").await.unwrap();
    assert!(quiet.is_empty());

    for region in ["RI&area=CA", "CA#RI", "CA "] {
        let rows = adapter.get_alerts(region).await.unwrap();
        assert!(rows.is_empty(), "{:?} was read upstream as CA", region);
    }

    // hourly forecast URL is not served by the fake upstream
    let hourly = adapter.get_forecast(LATITUDE, LONGITUDE, true).await;
    assert!(matches!(hourly, Err(Error::Status { status: 404, .. })));
}
