//! Single GET requests against the configured endpoint.

use bytes::Bytes;
use reqwest::{header::HeaderMap, Method, Url};

use crate::{config::ClientConfig, Error, Result};

/// query parameters of one request, `set` replaces an existing key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &'static str, value: impl ToString) {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter()
            .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

    pub fn pairs(&self) -> &[(&'static str, String)] { &self.pairs }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: Bytes,
    pub headers: HeaderMap,
}

/// Performs the GET requests for [`crate::OpenMensa`].
///
/// Holds the parsed endpoint and a `reqwest::Client` configured with the
/// timeout and user agent of a [`ClientConfig`]. Cloning is cheap and shares
/// the connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    endpoint: Url,
}

impl Fetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| Error::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;

        if endpoint.cannot_be_a_base() {
            return Err(Error::InvalidEndpoint(format!(
                "{}: cannot have path segments", config.endpoint,
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
        .map_err(Error::Client)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url { &self.endpoint }

    /// endpoint joined with `segments`, each segment is percent-encoded
    pub fn url(&self, query: &Query, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }

        Ok(url)
    }

    /// One attempt, no retries. Statuses from 400 up are errors.
    pub async fn get(&self, query: &Query, segments: &[&str]) -> Result<RawResponse> {
        let url = self.url(query, segments)?;
        tracing::debug!("GET {url}");

        let response = self.client.get(url.clone())
            .send().await
        .map_err(Error::Transport)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(Error::Status { method: Method::GET, url, status });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::Body)?;

        Ok(RawResponse { body, headers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(endpoint: &str) -> Fetcher {
        Fetcher::new(&ClientConfig::default().with_endpoint(endpoint)).unwrap()
    }

    #[test]
    fn query_set_replaces() {
        let mut query = Query::new().with("page", 1).with("ids", "1,2");
        query.set("page", 2);

        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.pairs(), [("page", "2".to_string()), ("ids", "1,2".to_string())]);
    }

    #[test]
    fn url_joins_segments() {
        let url = fetcher("https://openmensa.org/api/v2")
            .url(&Query::new(), &["canteens", "7", "days", "2024-03-01", "meals"])
        .unwrap();
        assert_eq!(url.as_str(), "https://openmensa.org/api/v2/canteens/7/days/2024-03-01/meals");
    }

    #[test]
    fn url_ignores_trailing_slash() {
        let url = fetcher("http://localhost:3000/api/v2/")
            .url(&Query::new(), &["canteens"])
        .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v2/canteens");
    }

    #[test]
    fn url_without_query_has_no_question_mark() {
        let url = fetcher("https://openmensa.org/api/v2")
            .url(&Query::new(), &["canteens", "1"])
        .unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn url_encodes_query() {
        let query = Query::new()
            .with("near[lat]", 52.5)
            .with("ids", "1,2")
        .with("page", 3);
        let url = fetcher("https://openmensa.org/api/v2")
            .url(&query, &["canteens"])
        .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, [
            ("near[lat]".to_string(), "52.5".to_string()),
            ("ids".to_string(), "1,2".to_string()),
            ("page".to_string(), "3".to_string()),
        ]);
    }

    #[test]
    fn invalid_endpoints() {
        let config = ClientConfig::default().with_endpoint("not a url");
        assert!(matches!(Fetcher::new(&config), Err(Error::InvalidEndpoint(_))));

        let config = ClientConfig::default().with_endpoint("mailto:mensa@example.org");
        assert!(matches!(Fetcher::new(&config), Err(Error::InvalidEndpoint(_))));
    }
}
