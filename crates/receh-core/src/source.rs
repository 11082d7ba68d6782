//! Report sources
//!
//! The engine never fetches anything itself. Callers load a [`Report`] from a
//! [`ReportSource`] and hand the records to the pure engine functions.
//! A fetch is one request with a bounded wait; there are no retries.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::error::Result;
use crate::payload::{decode_report, Report};

/// Anything that can produce a report payload
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch and decode one report
    async fn fetch(&self) -> Result<Report>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Report saved to a JSON file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSource for FileSource {
    async fn fetch(&self) -> Result<Report> {
        debug!("Reading report from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path)?;
        decode_report(&content)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Report fetched from the relay over HTTP
pub struct HttpSource {
    http_client: Client,
    base_url: String,
    endpoint: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ReportSource for HttpSource {
    async fn fetch(&self) -> Result<Report> {
        info!("Fetching report from {}", self.describe());

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("endpoint", self.endpoint.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!("Relay returned {} bytes", body.len());
        decode_report(&body)
    }

    fn describe(&self) -> String {
        format!("{} (endpoint {})", self.base_url, self.endpoint)
    }
}
