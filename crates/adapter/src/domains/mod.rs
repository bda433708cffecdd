mod alerts;
mod forecasts;
mod geo_json;
mod observations;
mod points;

pub use alerts::*;
pub use forecasts::*;
pub use observations::*;
pub use points::*;

pub(crate) use geo_json::{
    parse_time, parse_url, value_of, FeatureCollection, Measure, QuantitativeValue,
};
