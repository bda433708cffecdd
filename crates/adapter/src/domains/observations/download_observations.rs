use serde::{Deserialize, Serialize};
use slog::{debug, info, Logger};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::domains::{parse_time, parse_url, value_of, FeatureCollection, QuantitativeValue};
use crate::{Error, GeoJsonSource, PointMetadata};

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// One reading from a station, in the units upstream reports them plus
/// Fahrenheit copies of the two temperatures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRow {
    #[serde(with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    pub station: String,
    pub temperature_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_gust_kmh: Option<f64>,
    pub barometric_pressure_pa: Option<f64>,
    pub visibility_m: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub precipitation_last_hour_mm: Option<f64>,
    pub description: Option<String>,
    pub temperature_f: Option<f64>,
    pub dewpoint_f: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationProperties {
    station_identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationProperties {
    timestamp: Option<String>,
    text_description: Option<String>,
    temperature: Option<QuantitativeValue>,
    dewpoint: Option<QuantitativeValue>,
    wind_direction: Option<QuantitativeValue>,
    wind_speed: Option<QuantitativeValue>,
    wind_gust: Option<QuantitativeValue>,
    barometric_pressure: Option<QuantitativeValue>,
    visibility: Option<QuantitativeValue>,
    relative_humidity: Option<QuantitativeValue>,
    precipitation_last_hour: Option<QuantitativeValue>,
}

impl ObservationProperties {
    fn into_row(self, station: &str) -> Result<ObservationRow, Error> {
        let temperature_c = value_of(self.temperature);
        let dewpoint_c = value_of(self.dewpoint);

        Ok(ObservationRow {
            timestamp: parse_time(self.timestamp)?,
            station: station.to_string(),
            temperature_c,
            dewpoint_c,
            wind_direction: value_of(self.wind_direction),
            wind_speed_kmh: value_of(self.wind_speed),
            wind_gust_kmh: value_of(self.wind_gust),
            barometric_pressure_pa: value_of(self.barometric_pressure),
            visibility_m: value_of(self.visibility),
            relative_humidity: value_of(self.relative_humidity),
            precipitation_last_hour_mm: value_of(self.precipitation_last_hour),
            description: self.text_description,
            temperature_f: temperature_c.map(celsius_to_fahrenheit),
            dewpoint_f: dewpoint_c.map(celsius_to_fahrenheit),
        })
    }
}

/// Identifier of the first station in a station directory listing.
pub(crate) fn first_station(body: &str) -> Result<String, Error> {
    let directory: FeatureCollection<StationProperties> = serde_json::from_str(body)?;
    let first = directory
        .into_properties()
        .into_iter()
        .next()
        .ok_or(Error::NoStations)?;
    first
        .station_identifier
        .ok_or(Error::MissingField("stationIdentifier"))
}

pub(crate) fn flatten_observations(body: &str, station: &str) -> Result<Vec<ObservationRow>, Error> {
    let collection: FeatureCollection<ObservationProperties> = serde_json::from_str(body)?;
    collection
        .into_properties()
        .into_iter()
        .map(|properties| properties.into_row(station))
        .collect()
}

pub struct ObservationService {
    pub logger: Logger,
    pub fetcher: Arc<dyn GeoJsonSource>,
    base_url: String,
}

impl ObservationService {
    pub fn new(logger: Logger, fetcher: Arc<dyn GeoJsonSource>, base_url: &str) -> Self {
        ObservationService {
            logger,
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `station` comes from upstream and is pushed as a single path segment.
    pub fn observations_url(&self, station: &str, limit: u32) -> Result<String, Error> {
        let stations = format!("{}/stations", self.base_url);
        let mut url = parse_url(&stations)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl {
                url: stations.clone(),
                reason: "cannot be a base".to_string(),
            })?
            .push(station)
            .push("observations");
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(url.into())
    }

    /// Recent observations from the first station listed for `point`.
    /// Later stations in the directory are never consulted.
    pub async fn get_observations(
        &self,
        point: &PointMetadata,
        limit: u32,
    ) -> Result<Vec<ObservationRow>, Error> {
        let stations_url = point
            .observation_stations_url
            .as_deref()
            .ok_or(Error::MissingField("observationStations"))?;

        info!(self.logger, "fetching station directory from {}", stations_url);
        let directory = self.fetcher.fetch_geo_json(stations_url).await?;
        let station = first_station(&directory)?;
        debug!(self.logger, "using station {}", station);

        let url = self.observations_url(&station, limit)?;
        let body = self.fetcher.fetch_geo_json(&url).await?;
        let rows = flatten_observations(&body, &station)?;
        info!(
            self.logger,
            "flattened {} observations from {}",
            rows.len(),
            station
        );
        Ok(rows)
    }
}
