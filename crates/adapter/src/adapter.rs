use slog::{error, warn, Logger};
use std::{sync::Arc, time::Duration};

use crate::{
    AlertRow, AlertService, Error, ForecastRow, ForecastService, GeoJsonFetcher, GeoJsonSource,
    ObservationRow, ObservationService, PointMetadata, PointService, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        AdapterConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Entry point for callers: resolves coordinates and returns flat tables.
///
/// Every operation logs its own failure before handing it back, so callers
/// that only care about success can match on `Ok` and move on.
pub struct WeatherAdapter {
    logger: Logger,
    points: PointService,
    forecasts: ForecastService,
    observations: ObservationService,
    alerts: AlertService,
}

impl WeatherAdapter {
    pub fn new(logger: Logger, config: &AdapterConfig) -> Result<Self, Error> {
        let fetcher = GeoJsonFetcher::new(logger.clone(), &config.user_agent, config.timeout)?;
        Ok(Self::with_source(logger, Arc::new(fetcher), &config.base_url))
    }

    pub fn with_source(logger: Logger, source: Arc<dyn GeoJsonSource>, base_url: &str) -> Self {
        WeatherAdapter {
            points: PointService::new(logger.clone(), source.clone(), base_url),
            forecasts: ForecastService::new(logger.clone(), source.clone()),
            observations: ObservationService::new(logger.clone(), source.clone(), base_url),
            alerts: AlertService::new(logger.clone(), source, base_url),
            logger,
        }
    }

    pub async fn resolve_point(&self, latitude: f64, longitude: f64) -> Result<PointMetadata, Error> {
        self.points
            .resolve_point(latitude, longitude)
            .await
            .map_err(|e| self.report("resolving point", e))
    }

    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        hourly: bool,
    ) -> Result<Vec<ForecastRow>, Error> {
        let point = self.resolve_point(latitude, longitude).await?;
        self.forecasts
            .get_forecast(&point, latitude, longitude, hourly)
            .await
            .map_err(|e| self.report("fetching forecast", e))
    }

    pub async fn get_observations(
        &self,
        latitude: f64,
        longitude: f64,
        limit: u32,
    ) -> Result<Vec<ObservationRow>, Error> {
        let point = self.resolve_point(latitude, longitude).await?;
        self.observations
            .get_observations(&point, limit)
            .await
            .map_err(|e| self.report("fetching observations", e))
    }

    pub async fn get_alerts(&self, region: &str) -> Result<Vec<AlertRow>, Error> {
        self.alerts
            .get_alerts(region)
            .await
            .map_err(|e| self.report("fetching alerts", e))
    }

    fn report(&self, operation: &str, err: Error) -> Error {
        match &err {
            Error::NoStations => warn!(self.logger, "{}: {}", operation, err),
            _ => error!(self.logger, "error {}: {}", operation, err),
        }
        err
    }
}
