use serde::{Deserialize, Serialize};
use slog::{info, Logger};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::domains::{parse_time, value_of, Measure, QuantitativeValue};
use crate::{Error, GeoJsonSource, PointMetadata};

/// One forecast period, with the location it was requested for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub number: Option<i64>,
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    pub is_daytime: Option<bool>,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    pub temperature_trend: Option<String>,
    pub probability_of_precipitation: Option<f64>,
    pub dewpoint: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub icon: Option<String>,
    pub short_forecast: Option<String>,
    pub detailed_forecast: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Option<Vec<Period>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Period {
    number: Option<i64>,
    name: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    is_daytime: Option<bool>,
    temperature: Option<Measure>,
    temperature_unit: Option<String>,
    temperature_trend: Option<String>,
    probability_of_precipitation: Option<QuantitativeValue>,
    dewpoint: Option<QuantitativeValue>,
    relative_humidity: Option<QuantitativeValue>,
    wind_speed: Option<String>,
    wind_direction: Option<String>,
    icon: Option<String>,
    short_forecast: Option<String>,
    detailed_forecast: Option<String>,
}

/// Constant columns stamped onto every row of one forecast.
#[derive(Debug, Clone)]
pub struct ForecastLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Period {
    fn into_row(self, location: &ForecastLocation) -> Result<ForecastRow, Error> {
        Ok(ForecastRow {
            number: self.number,
            name: self.name,
            start_time: parse_time(self.start_time)?,
            end_time: parse_time(self.end_time)?,
            is_daytime: self.is_daytime,
            temperature: self.temperature.and_then(|t| t.value()),
            temperature_unit: self.temperature_unit,
            temperature_trend: self.temperature_trend,
            probability_of_precipitation: value_of(self.probability_of_precipitation),
            dewpoint: value_of(self.dewpoint),
            relative_humidity: value_of(self.relative_humidity),
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            icon: self.icon,
            short_forecast: self.short_forecast,
            detailed_forecast: self.detailed_forecast,
            city: location.city.clone(),
            state: location.state.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }
}

pub(crate) fn flatten_forecast(
    body: &str,
    location: &ForecastLocation,
) -> Result<Vec<ForecastRow>, Error> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    response
        .properties
        .and_then(|properties| properties.periods)
        .unwrap_or_default()
        .into_iter()
        .map(|period| period.into_row(location))
        .collect()
}

pub struct ForecastService {
    pub logger: Logger,
    pub fetcher: Arc<dyn GeoJsonSource>,
}

impl ForecastService {
    pub fn new(logger: Logger, fetcher: Arc<dyn GeoJsonSource>) -> Self {
        ForecastService { logger, fetcher }
    }

    /// Fetches the daily (or hourly) forecast linked from `point` and
    /// flattens its periods. `latitude`/`longitude` are the caller's
    /// coordinate, carried onto each row as-is.
    pub async fn get_forecast(
        &self,
        point: &PointMetadata,
        latitude: f64,
        longitude: f64,
        hourly: bool,
    ) -> Result<Vec<ForecastRow>, Error> {
        let url = if hourly {
            point
                .forecast_hourly_url
                .as_deref()
                .ok_or(Error::MissingField("forecastHourly"))?
        } else {
            point
                .forecast_url
                .as_deref()
                .ok_or(Error::MissingField("forecast"))?
        };

        info!(
            self.logger,
            "fetching {} forecast from {}",
            if hourly { "hourly" } else { "daily" },
            url
        );
        let body = self.fetcher.fetch_geo_json(url).await?;

        let location = ForecastLocation {
            city: point.city.clone(),
            state: point.state.clone(),
            latitude,
            longitude,
        };
        let rows = flatten_forecast(&body, &location)?;
        info!(self.logger, "flattened {} forecast periods", rows.len());
        Ok(rows)
    }
}
