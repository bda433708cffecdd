mod download_alerts;

pub use download_alerts::*;
