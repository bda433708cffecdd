use serde::{Deserialize, Serialize};
use slog::{info, Logger};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::domains::{parse_time, parse_url, FeatureCollection};
use crate::{Error, GeoJsonSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow {
    pub event: Option<String>,
    pub severity: Option<String>,
    pub certainty: Option<String>,
    pub urgency: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub onset: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,
    /// Zone URLs joined with `", "`; empty when the alert lists none.
    pub affected_zones: String,
    pub area_desc: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertProperties {
    event: Option<String>,
    severity: Option<String>,
    certainty: Option<String>,
    urgency: Option<String>,
    headline: Option<String>,
    description: Option<String>,
    instruction: Option<String>,
    onset: Option<String>,
    expires: Option<String>,
    affected_zones: Option<Vec<String>>,
    area_desc: Option<String>,
}

impl AlertProperties {
    fn into_row(self) -> Result<AlertRow, Error> {
        Ok(AlertRow {
            event: self.event,
            severity: self.severity,
            certainty: self.certainty,
            urgency: self.urgency,
            headline: self.headline,
            description: self.description,
            instruction: self.instruction,
            onset: parse_time(self.onset)?,
            expires: parse_time(self.expires)?,
            affected_zones: self.affected_zones.unwrap_or_default().join(", "),
            area_desc: self.area_desc,
        })
    }
}

pub(crate) fn flatten_alerts(body: &str) -> Result<Vec<AlertRow>, Error> {
    let collection: FeatureCollection<AlertProperties> = serde_json::from_str(body)?;
    collection
        .into_properties()
        .into_iter()
        .map(AlertProperties::into_row)
        .collect()
}

pub struct AlertService {
    pub logger: Logger,
    pub fetcher: Arc<dyn GeoJsonSource>,
    base_url: String,
}

impl AlertService {
    pub fn new(logger: Logger, fetcher: Arc<dyn GeoJsonSource>, base_url: &str) -> Self {
        AlertService {
            logger,
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `region` travels as the form-encoded `area` query value.
    pub fn alerts_url(&self, region: &str) -> Result<String, Error> {
        let mut url = parse_url(&format!("{}/alerts/active", self.base_url))?;
        url.query_pairs_mut().append_pair("area", region);
        Ok(url.into())
    }

    pub async fn get_alerts(&self, region: &str) -> Result<Vec<AlertRow>, Error> {
        let url = self.alerts_url(region)?;
        info!(self.logger, "fetching active alerts for {}", region);
        let body = self.fetcher.fetch_geo_json(&url).await?;
        let rows = flatten_alerts(&body)?;
        info!(self.logger, "{} active alerts for {}", rows.len(), region);
        Ok(rows)
    }
}
