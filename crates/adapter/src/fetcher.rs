use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use slog::{debug, Logger};
use std::time::Duration;

use crate::Error;

pub const GEO_JSON: &str = "application/geo+json";

/// Anything that can hand back the raw body of a GET against the weather API.
#[async_trait]
pub trait GeoJsonSource: Send + Sync {
    async fn fetch_geo_json(&self, url: &str) -> Result<String, Error>;
}

pub struct GeoJsonFetcher {
    logger: Logger,
    client: Client,
    timeout: Duration,
}

impl GeoJsonFetcher {
    pub fn new(logger: Logger, user_agent: &str, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            logger,
            client,
            timeout,
        })
    }
}

#[async_trait]
impl GeoJsonSource for GeoJsonFetcher {
    async fn fetch_geo_json(&self, url: &str) -> Result<String, Error> {
        debug!(self.logger, "requesting: {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        if !response.status().is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|e| request_error(url, e))
    }
}

fn request_error(url: &str, source: reqwest::Error) -> Error {
    if source.is_timeout() {
        Error::Timeout {
            url: url.to_string(),
        }
    } else {
        Error::Request {
            url: url.to_string(),
            source,
        }
    }
}
