/// HTTP access to the metrics API
///
/// `SampleSource` is the seam between the poller and whatever produces
/// samples. The HTTP implementation reads `/api/graph`; the cluster node list
/// comes from `/api/metrics`.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::nodes::ClusterNode;
use super::sample::{Sample, SampleDto};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("invalid payload: {0}")]
    Decode(String),

    #[error("invalid date '{date}': {source}")]
    InvalidDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Producer of one sample per call
pub trait SampleSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Sample, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpSampleSource {
    client: Client,
    url: String,
}

impl HttpSampleSource {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: api_url(endpoint, "/api/graph"),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SampleSource for HttpSampleSource {
    async fn fetch(&self) -> Result<Sample, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let dto: SampleDto =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        Sample::try_from(dto)
    }
}

/// Client for the cluster node listing
#[derive(Debug, Clone)]
pub struct NodeClient {
    client: Client,
    url: String,
}

impl NodeClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: api_url(endpoint, "/api/metrics"),
        })
    }

    pub async fn fetch_nodes(&self) -> Result<Vec<ClusterNode>, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Join a base endpoint and an API path without doubling slashes
pub fn api_url(endpoint: &str, path: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), path)
}
