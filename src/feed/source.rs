//! Upstream spot-price sources

use super::types::{percent_of, FetchError, FeedError, PriceSnapshot};
use crate::config::SourceConfig;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Something that can produce one real price observation
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current spot price
    async fn fetch(&self) -> Result<PriceSnapshot, FetchError>;
}

/// Upstream payload, quoted in USD per troy ounce
#[derive(Debug, Deserialize)]
struct SpotPayload {
    price: Decimal,
    #[serde(default)]
    change: Option<Decimal>,
}

/// HTTP spot-price source converting USD/oz quotes into EUR/g
pub struct HttpSpotSource {
    url: String,
    grams_per_troy_ounce: Decimal,
    conversion_rate: Decimal,
    client: Client,
}

impl HttpSpotSource {
    /// Create a source from configuration
    pub fn new(config: &SourceConfig) -> Result<Self, FeedError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(FeedError::HttpClient)?;

        Ok(Self {
            url: config.url.clone(),
            grams_per_troy_ounce: config.grams_per_troy_ounce,
            conversion_rate: config.conversion_rate,
            client,
        })
    }

    /// Endpoint being polled
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decode an upstream body and convert it to the target unit
    fn parse_payload(&self, body: &str) -> Result<PriceSnapshot, FetchError> {
        let payload: SpotPayload =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        if payload.price <= Decimal::ZERO {
            return Err(FetchError::Malformed(format!(
                "non-positive price {}",
                payload.price
            )));
        }

        let raw_change = payload.change.unwrap_or(Decimal::ZERO);
        let factor = self
            .conversion_rate
            .checked_div(self.grams_per_troy_ounce)
            .ok_or_else(|| FetchError::Malformed("invalid unit conversion".into()))?;

        Ok(PriceSnapshot {
            price: payload.price / self.grams_per_troy_ounce * self.conversion_rate,
            change: raw_change * factor,
            change_percent: percent_of(raw_change, payload.price - raw_change),
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl PriceSource for HttpSpotSource {
    async fn fetch(&self) -> Result<PriceSnapshot, FetchError> {
        tracing::debug!(url = %self.url, "Fetching spot price");

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        self.parse_payload(&body)
    }
}

/// Source that never answers; the feed runs on the simulator alone
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSource;

#[async_trait]
impl PriceSource for UnavailableSource {
    async fn fetch(&self) -> Result<PriceSnapshot, FetchError> {
        Err(FetchError::Unavailable)
    }
}
