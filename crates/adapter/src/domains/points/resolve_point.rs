use serde::{Deserialize, Serialize};
use slog::{debug, info, Logger};
use std::sync::Arc;

use crate::{Error, GeoJsonSource};

/// Where a coordinate lands on the upstream forecast grid, and the URLs
/// that hang off of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointMetadata {
    pub grid_id: Option<String>,
    pub grid_x: Option<i64>,
    pub grid_y: Option<i64>,
    pub forecast_url: Option<String>,
    pub forecast_hourly_url: Option<String>,
    pub observation_stations_url: Option<String>,
    pub timezone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PointResponse {
    properties: Option<PointProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointProperties {
    grid_id: Option<String>,
    grid_x: Option<i64>,
    grid_y: Option<i64>,
    forecast: Option<String>,
    forecast_hourly: Option<String>,
    observation_stations: Option<String>,
    time_zone: Option<String>,
    relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
struct RelativeLocation {
    properties: Option<RelativeLocationProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct RelativeLocationProperties {
    city: Option<String>,
    state: Option<String>,
}

impl From<PointProperties> for PointMetadata {
    fn from(val: PointProperties) -> Self {
        let place = val
            .relative_location
            .and_then(|location| location.properties)
            .unwrap_or_default();

        PointMetadata {
            grid_id: val.grid_id,
            grid_x: val.grid_x,
            grid_y: val.grid_y,
            forecast_url: val.forecast,
            forecast_hourly_url: val.forecast_hourly,
            observation_stations_url: val.observation_stations,
            timezone: val.time_zone,
            city: place.city,
            state: place.state,
        }
    }
}

pub(crate) fn parse_point(body: &str) -> Result<PointMetadata, Error> {
    let response: PointResponse = serde_json::from_str(body)?;
    Ok(response.properties.unwrap_or_default().into())
}

pub struct PointService {
    pub logger: Logger,
    pub fetcher: Arc<dyn GeoJsonSource>,
    base_url: String,
}

/// Whole degrees keep one decimal place (`38.0`, not `38`).
fn coordinate(degrees: f64) -> String {
    if degrees.is_finite() && degrees.fract() == 0.0 {
        format!("{:.1}", degrees)
    } else {
        degrees.to_string()
    }
}

impl PointService {
    pub fn new(logger: Logger, fetcher: Arc<dyn GeoJsonSource>, base_url: &str) -> Self {
        PointService {
            logger,
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn point_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/points/{},{}",
            self.base_url,
            coordinate(latitude),
            coordinate(longitude)
        )
    }

    pub async fn resolve_point(&self, latitude: f64, longitude: f64) -> Result<PointMetadata, Error> {
        let url = self.point_url(latitude, longitude);
        info!(self.logger, "resolving point {},{}", latitude, longitude);
        let body = self.fetcher.fetch_geo_json(&url).await?;
        let point = parse_point(&body)?;
        debug!(
            self.logger,
            "point {},{} is grid {:?} ({:?}, {:?})",
            latitude,
            longitude,
            point.grid_id,
            point.city,
            point.state
        );
        Ok(point)
    }
}
