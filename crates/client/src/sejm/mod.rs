//! Sejm ELI API client.
//!
//! Read-only access to the Journal of Laws (Dziennik Ustaw) registry.
//!
//! ### Endpoints
//!
//! - `GET {base}/acts/DU/{year}`: listing envelope `{items, offset, totalCount}`
//! - `GET {base}/acts/DU/{year}/{position}`: one act record
//!
//! Nothing is cached here; callers decide what to keep.

pub mod error;
pub mod response;

pub use error::SejmError;
pub use response::ActsPage;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use url::Url;
use ustawka_core::config::DEFAULT_API_TIMEOUT;
use ustawka_core::models::PUBLISHER;
use ustawka_core::{Act, ActDetails, ActId, ActsSource, AppConfig, Error};

/// Default base URL for the ELI API.
const DEFAULT_BASE_URL: &str = "https://api.sejm.gov.pl/eli";

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "ustawka/0.1";

/// Registry client configuration.
#[derive(Debug, Clone)]
pub struct SejmConfig {
    /// Base URL (default: https://api.sejm.gov.pl/eli).
    pub base_url: String,
    /// Transport timeout for a whole request (default: 5s).
    pub timeout: Duration,
    /// User-agent string (default: ustawka/0.x).
    pub user_agent: String,
}

impl Default for SejmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_API_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for SejmConfig {
    fn from(config: &AppConfig) -> Self {
        Self { base_url: config.base_url.clone(), timeout: config.api_timeout(), user_agent: config.user_agent.clone() }
    }
}

/// Sejm ELI API client.
#[derive(Debug, Clone)]
pub struct SejmClient {
    http: reqwest::Client,
    base: Url,
    config: SejmConfig,
}

impl SejmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SejmConfig) -> Result<Self, SejmError> {
        let base = Url::parse(config.base_url.trim()).map_err(|e| SejmError::InvalidBaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(SejmError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, base, config })
    }

    pub fn config(&self) -> &SejmConfig {
        &self.config
    }

    /// Listing of all acts published in `year`, in registry order.
    pub async fn acts(&self, year: i32) -> Result<Vec<Act>, SejmError> {
        let url = self.endpoint(&["acts", PUBLISHER, &year.to_string()])?;
        let page: ActsPage = self.get_json(url).await?;

        tracing::debug!(year, count = page.items.len(), total = page.total_count, "fetched acts");
        Ok(page.items)
    }

    /// Full record of one act.
    pub async fn act_details(&self, id: &ActId) -> Result<ActDetails, SejmError> {
        let url = self.endpoint(&["acts", PUBLISHER, &id.year().to_string(), &id.position().to_string()])?;
        let details: ActDetails = self.get_json(url).await?;

        tracing::debug!(id = %id, "fetched act details");
        Ok(details)
    }

    /// Base URL with `segments` appended; a trailing slash on the base is ignored.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SejmError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SejmError::InvalidBaseUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SejmError> {
        let start = Instant::now();
        tracing::debug!(url = %url, "requesting registry");

        let response = self.http.get(url).header(header::ACCEPT, "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SejmError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice(&bytes).map_err(|e| SejmError::Parse(e.to_string()))?;

        tracing::debug!(elapsed = ?start.elapsed(), bytes = bytes.len(), "registry responded");
        Ok(parsed)
    }
}

#[async_trait]
impl ActsSource for SejmClient {
    async fn fetch_acts(&self, year: i32) -> Result<Vec<Act>, Error> {
        Ok(self.acts(year).await?)
    }

    async fn fetch_act_details(&self, id: &ActId) -> Result<ActDetails, Error> {
        Ok(self.act_details(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();

            let text = String::from_utf8_lossy(&request).to_string();
            text.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{addr}/eli/"), handle)
    }

    fn client(base_url: String) -> SejmClient {
        SejmClient::new(SejmConfig { base_url, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = SejmClient::new(SejmConfig { base_url: "not a url".into(), ..Default::default() });
        assert!(matches!(result, Err(SejmError::InvalidBaseUrl(_))));

        let result = SejmClient::new(SejmConfig { base_url: "mailto:sejm@example.org".into(), ..Default::default() });
        assert!(matches!(result, Err(SejmError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_endpoint_segments() {
        let sejm = client("https://api.sejm.gov.pl/eli/".into());
        let url = sejm.endpoint(&["acts", PUBLISHER, "2024", "17"]).unwrap();
        assert_eq!(url.as_str(), "https://api.sejm.gov.pl/eli/acts/DU/2024/17");

        let sejm = client("https://api.sejm.gov.pl/eli".into());
        let url = sejm.endpoint(&["acts", PUBLISHER, "2021"]).unwrap();
        assert_eq!(url.as_str(), "https://api.sejm.gov.pl/eli/acts/DU/2021");
    }

    #[tokio::test]
    async fn test_fetch_acts() {
        let body = r#"{"items":[{"ELI":"DU/2024/1","title":"Ustawa","status":"obowiązujący","promulgation":"2024-01-02","pos":1,"year":2024,"type":"Ustawa","address":"WDU20240000001"},{"ELI":"DU/2024/2","title":"Obwieszczenie","status":"","pos":2,"year":2024}],"offset":0,"totalCount":2}"#;
        let (base, server) = serve_once("200 OK", body).await;

        let acts = client(base).fetch_acts(2024).await.unwrap();
        assert_eq!(acts.len(), 2);
        assert_eq!(acts[0].id, "DU/2024/1");
        assert_eq!(acts[0].published, "2024-01-02");
        assert_eq!(acts[1].position, 2);

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /eli/acts/DU/2024 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_fetch_act_details() {
        let body = r#"{"ELI":"DU/2024/17","title":"Rozporządzenie","pos":17,"year":2024,"textPDF":true,"keywords":["cła"],"references":{"Podstawa prawna":[{"id":"DU/2023/1","art":"art. 5"}]},"prints":null}"#;
        let (base, server) = serve_once("200 OK", body).await;

        let details = client(base).fetch_act_details(&ActId::new(2024, 17)).await.unwrap();
        assert_eq!(details.id, "DU/2024/17");
        assert!(details.text_pdf);
        assert_eq!(details.keywords, Some(vec!["cła".to_string()]));
        assert_eq!(details.released_by, None);
        assert_eq!(details.references.legal_basis.unwrap()[0].art.as_deref(), Some("art. 5"));

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /eli/acts/DU/2024/17 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_error() {
        let (base, _server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;

        let err = client(base).fetch_acts(2024).await.unwrap_err();
        assert!(matches!(&err, Error::Upstream(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_bad_body_is_decode_error() {
        let (base, _server) = serve_once("200 OK", r#"{"items": "#).await;

        let err = client(base).fetch_acts(2024).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_upstream_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/eli")).fetch_acts(2024).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
