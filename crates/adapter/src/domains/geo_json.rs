//! Shapes shared by every api.weather.gov GeoJSON payload.
//!
//! Everything is optional: a missing or `null` leaf decodes to `None` and
//! only a structurally wrong body (not JSON, an array where an object is
//! expected, a string where a number is expected) fails decoding.

use reqwest::Url;
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::Error;

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection<P> {
    pub features: Option<Vec<Feature<P>>>,
}

impl<P: Default> FeatureCollection<P> {
    /// Properties of each feature, in upstream order.
    pub fn into_properties(self) -> Vec<P> {
        self.features
            .unwrap_or_default()
            .into_iter()
            .map(|feature| feature.properties.unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature<P> {
    pub properties: Option<P>,
}

/// `{"unitCode": "wmoUnit:degC", "value": 20.0}`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct QuantitativeValue {
    pub value: Option<f64>,
}

/// Some fields come back as a bare number or as a quantitative value
/// depending on the endpoint's feature flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Measure {
    Number(f64),
    Quantity(QuantitativeValue),
}

impl Measure {
    pub fn value(&self) -> Option<f64> {
        match self {
            Measure::Number(value) => Some(*value),
            Measure::Quantity(quantity) => quantity.value,
        }
    }
}

pub(crate) fn value_of(quantity: Option<QuantitativeValue>) -> Option<f64> {
    quantity.and_then(|q| q.value)
}

pub(crate) fn parse_time(value: Option<String>) -> Result<Option<OffsetDateTime>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => match OffsetDateTime::parse(&raw, &Rfc3339) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(source) => Err(Error::TimeParse { value: raw, source }),
        },
    }
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, Error> {
    Url::parse(raw).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
