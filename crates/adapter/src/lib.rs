mod adapter;
mod config;
mod domains;
mod error;
mod fetcher;
mod utils;

pub use adapter::*;
pub use config::*;
pub use domains::*;
pub use error::*;
pub use fetcher::*;
pub use utils::*;

/// Application name used for XDG paths
pub const APP_NAME: &str = "nws-tables";

pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// api.weather.gov asks for a contact in the User-Agent
pub const DEFAULT_USER_AGENT: &str = "nws-tables/1.0 (contact@example.com)";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_OBSERVATION_LIMIT: u32 = 50;

pub const DEFAULT_ALERT_REGION: &str = "CA";
