//! Single-request HTTP transport shared by every source.
//!
//! Sources describe a request as a [`RequestSpec`]; [`HttpTransport`]
//! performs it once, with no retries, and hands back the raw body text.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    /// `GET` with `params` encoded into the query string.
    Get,
    /// `POST` with `params` sent as an `application/x-www-form-urlencoded` body.
    PostForm,
}

/// Everything needed to issue one request for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: RequestMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub params: Vec<(&'static str, String)>,
}

impl RequestSpec {
    /// Value of the first parameter named `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Thin wrapper over a `reqwest::Client` with a fixed request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport whose requests time out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Performs the request once and returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure, timeout, or an invalid
    ///   header in `request`.
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    pub async fn execute(&self, request: &RequestSpec) -> Result<String, ScraperError> {
        let mut builder = match request.method {
            RequestMethod::Get => self.client.get(&request.url).query(&request.params),
            RequestMethod::PostForm => self.client.post(&request.url).form(&request.params),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_request() -> RequestSpec {
        RequestSpec {
            method: RequestMethod::Get,
            url: "https://example.com/list".to_string(),
            headers: vec![("user-agent", "test-agent".to_string())],
            params: vec![("page", "2".to_string()), ("size", "24".to_string())],
        }
    }

    #[test]
    fn param_lookup_returns_first_match() {
        let request = listing_request();
        assert_eq!(request.param("page"), Some("2"));
        assert_eq!(request.param("size"), Some("24"));
        assert!(request.param("missing").is_none());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = listing_request();
        assert_eq!(request.header("User-Agent"), Some("test-agent"));
        assert!(request.header("referer").is_none());
    }

    #[test]
    fn transport_builds_with_timeout() {
        assert!(HttpTransport::new(10).is_ok());
    }
}
