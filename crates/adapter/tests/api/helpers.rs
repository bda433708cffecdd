use async_trait::async_trait;
use mockall::mock;
use nws_adapter::{Error, GeoJsonSource, WeatherAdapter};
use slog::{o, Discard, Logger};
use std::sync::Arc;

mock! {
    pub Upstream {}
    #[async_trait]
    impl GeoJsonSource for Upstream {
        async fn fetch_geo_json(&self, url: &str) -> Result<String, Error>;
    }
}

pub const BASE_URL: &str = "https://api.weather.test";
pub const LATITUDE: f64 = 37.7749;
pub const LONGITUDE: f64 = -122.4194;

pub fn test_logger() -> Logger {
    Logger::root(Discard, o!())
}

pub fn adapter_with(upstream: MockUpstream) -> WeatherAdapter {
    WeatherAdapter::with_source(test_logger(), Arc::new(upstream), BASE_URL)
}

pub fn point_url() -> String {
    format!("{}/points/{},{}", BASE_URL, LATITUDE, LONGITUDE)
}

pub fn forecast_url() -> String {
    format!("{}/gridpoints/MTR/85,105/forecast", BASE_URL)
}

pub fn forecast_hourly_url() -> String {
    format!("{}/gridpoints/MTR/85,105/forecast/hourly", BASE_URL)
}

pub fn stations_url() -> String {
    format!("{}/gridpoints/MTR/85,105/stations", BASE_URL)
}

pub fn point_body(base: &str) -> String {
    format!(
        r#"{{
            "id": "{base}/points/37.7749,-122.4194",
            "type": "Feature",
            "properties": {{
                "gridId": "MTR",
                "gridX": 85,
                "gridY": 105,
                "forecast": "{base}/gridpoints/MTR/85,105/forecast",
                "forecastHourly": "{base}/gridpoints/MTR/85,105/forecast/hourly",
                "observationStations": "{base}/gridpoints/MTR/85,105/stations",
                "timeZone": "America/Los_Angeles",
                "relativeLocation": {{
                    "type": "Feature",
                    "properties": {{"city": "San Francisco", "state": "CA"}}
                }}
            }}
        }}"#
    )
}

pub fn forecast_body() -> String {
    r#"{"properties": {"periods": [
        {
            "number": 1,
            "name": "Today",
            "startTime": "2024-08-12T06:00:00-07:00",
            "endTime": "2024-08-12T18:00:00-07:00",
            "isDaytime": true,
            "temperature": 68,
            "temperatureUnit": "F",
            "windSpeed": "10 mph",
            "windDirection": "W",
            "shortForecast": "Sunny",
            "detailedForecast": "Sunny, with a high near 68."
        },
        {
            "number": 2,
            "name": "Tonight",
            "startTime": "2024-08-12T18:00:00-07:00",
            "endTime": "2024-08-13T06:00:00-07:00",
            "isDaytime": false,
            "temperature": 55,
            "temperatureUnit": "F",
            "windSpeed": "5 mph",
            "windDirection": "WSW",
            "shortForecast": "Patchy Fog",
            "detailedForecast": "Patchy fog after 11pm."
        }
    ]}}"#
    .to_string()
}

pub fn hourly_body() -> String {
    r#"{"properties": {"periods": [{
        "number": 1,
        "startTime": "2024-08-12T06:00:00-07:00",
        "endTime": "2024-08-12T07:00:00-07:00",
        "temperature": {"unitCode": "wmoUnit:degF", "value": 57},
        "relativeHumidity": {"unitCode": "wmoUnit:percent", "value": 90},
        "dewpoint": {"unitCode": "wmoUnit:degC", "value": 12.2},
        "shortForecast": "Cloudy"
    }]}}"#
        .to_string()
}

pub fn stations_body(ids: &[&str]) -> String {
    let features: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"properties": {{"stationIdentifier": "{id}"}}}}"#))
        .collect();
    format!(r#"{{"features": [{}]}}"#, features.join(","))
}

pub fn observations_body() -> String {
    r#"{"features": [
        {"properties": {
            "timestamp": "2024-08-12T17:53:00+00:00",
            "textDescription": "Clear",
            "temperature": {"unitCode": "wmoUnit:degC", "value": 20.0},
            "dewpoint": {"unitCode": "wmoUnit:degC", "value": 10.0},
            "windSpeed": {"unitCode": "wmoUnit:km_h-1", "value": 18.36}
        }},
        {"properties": {
            "timestamp": "2024-08-12T16:53:00+00:00",
            "textDescription": null,
            "temperature": {"unitCode": "wmoUnit:degC", "value": null},
            "dewpoint": {"unitCode": "wmoUnit:degC", "value": null}
        }}
    ]}"#
    .to_string()
}

pub fn alerts_body() -> String {
    r#"{"features": [
        {"properties": {
            "event": "Heat Advisory",
            "severity": "Moderate",
            "certainty": "Likely",
            "urgency": "Expected",
            "headline": "Heat Advisory issued August 12",
            "onset": "2024-08-12T11:00:00-07:00",
            "expires": "2024-08-12T20:00:00-07:00",
            "affectedZones": ["Zone1", "Zone2"]
        }},
        {"properties": {
            "event": "Beach Hazards Statement",
            "onset": null,
            "expires": "2024-08-13T05:00:00-07:00",
            "affectedZones": []
        }}
    ]}"#
    .to_string()
}
