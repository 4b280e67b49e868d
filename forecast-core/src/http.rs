use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};
use url::Url;

use crate::{ForecastError, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Transport used by [`ForecastClient`](crate::ForecastClient) to issue GETs.
#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    /// Fetch `url` with `params` appended as a query string and return the
    /// body. Non-2xx responses are transport errors.
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<String>;
}

/// Append `params` to `url`, keeping any query it already carries.
pub fn build_url(url: &str, params: &[(String, String)]) -> Result<Url> {
    let mut url =
        Url::parse(url).map_err(|e| ForecastError::Transport(format!("Invalid URL '{url}': {e}")))?;

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    http: Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<String> {
        let url = build_url(url, params)?;

        let res = self.http.get(url).send().await.map_err(|e| {
            ForecastError::Transport(format!("Failed to send request to forecast API: {e}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ForecastError::Transport(format!("Failed to read forecast response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ForecastError::Transport(format!(
                "API returned HTTP status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn build_url_appends_with_question_mark_or_ampersand() {
        let url = build_url("https://api.test/forecast/KEY/1,2", &params(&[("units", "si")])).unwrap();
        assert_eq!(url.as_str(), "https://api.test/forecast/KEY/1,2?units=si");

        let url = build_url("https://api.test/f?lang=de", &params(&[("units", "ca")])).unwrap();
        assert_eq!(url.as_str(), "https://api.test/f?lang=de&units=ca");

        let url = build_url("https://api.test/f", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.test/f");
    }

    #[test]
    fn build_url_rejects_garbage() {
        let err = build_url("not a url", &[]).unwrap_err();
        assert!(matches!(err, ForecastError::Transport(_)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "°".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[tokio::test]
    async fn get_returns_body_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast/KEY/1.5,2.5"))
            .and(query_param("units", "si"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"latitude\":1.5}"))
            .mount(&server)
            .await;

        let client = ReqwestClient::new().unwrap();
        let url = format!("{}/forecast/KEY/1.5,2.5", server.uri());
        let body = client.get(&url, &params(&[("units", "si")])).await.unwrap();

        assert_eq!(body, "{\"latitude\":1.5}");
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = ReqwestClient::new().unwrap();
        let err = client.get(&server.uri(), &[]).await.unwrap_err();

        match err {
            ForecastError::Transport(msg) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("forbidden"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
