use reqwest::{Method, StatusCode, Url};

use crate::processed::CanteenId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("{method} {url}: {status}")]
    Status {
        method: Method,
        url: Url,
        status: StatusCode,
    },
    #[error("could not read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex_lite::Error),
    #[error("no matching canteen found")]
    NoMatchingCanteen,
    #[error("canteen {0} has no open day in the queried window")]
    NoOpenDay(CanteenId),
}

impl Error {
    /// status code of a failed request, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(v: std::convert::Infallible) -> Self { match v {} }
}
