/// Failures talking to, or making sense of, api.weather.gov.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("error sending request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to parse time {value:?}: {source}")]
    TimeParse {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("response missing {0}")]
    MissingField(&'static str),
    #[error("no observation stations found")]
    NoStations,
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status { status: 404, .. })
    }
}
