// src/services/api.rs
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

use crate::handlers::error::{DashboardError, Result};
use crate::models::{
    ProfileEnvelope, ProfileSnapshot, SeriesEnvelope, SeriesSnapshot, StatsEnvelope,
    StatsSnapshot,
};

pub const DEFAULT_BASE_URL: &str = "https://stocksapi-uhe1.onrender.com";

pub const STATS_PATH: &str = "/api/stocks/getstockstatsdata";
pub const PROFILE_PATH: &str = "/api/stocks/getstocksprofiledata";
pub const SERIES_PATH: &str = "/api/stocks/getstocksdata";

/// Where the dashboard gets its snapshots from. Every call fetches a fresh
/// document; nothing is cached between calls.
pub trait StockSource: Send + Sync + 'static {
    fn fetch_stats(&self) -> impl Future<Output = Result<StatsSnapshot>> + Send;

    fn fetch_profiles(&self) -> impl Future<Output = Result<ProfileSnapshot>> + Send;

    fn fetch_series(&self) -> impl Future<Output = Result<SeriesSnapshot>> + Send;
}

/// [`StockSource`] backed by the stocks HTTP API.
pub struct HttpStockSource {
    client: Client,
    base_url: String,
}

impl HttpStockSource {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DashboardError::transport(base_url, e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &'static str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        info!("Fetching {} from URL: {}", what, url);

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| DashboardError::transport(&url, e))?
            .text()
            .await
            .map_err(|e| DashboardError::transport(&url, e))?;
        debug!("Received {} bytes of {}", body.len(), what);

        serde_json::from_str(&body).map_err(|e| DashboardError::decode(what, e))
    }
}

impl StockSource for HttpStockSource {
    async fn fetch_stats(&self) -> Result<StatsSnapshot> {
        let envelope: StatsEnvelope = self.get_json(STATS_PATH, "stock stats").await?;
        StatsSnapshot::try_from(envelope)
    }

    async fn fetch_profiles(&self) -> Result<ProfileSnapshot> {
        let envelope: ProfileEnvelope = self.get_json(PROFILE_PATH, "stock profiles").await?;
        Ok(ProfileSnapshot::from(envelope))
    }

    async fn fetch_series(&self) -> Result<SeriesSnapshot> {
        let envelope: SeriesEnvelope = self.get_json(SERIES_PATH, "stock series").await?;
        SeriesSnapshot::try_from(envelope)
    }
}
