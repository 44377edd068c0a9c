//! Exchange ticker client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::QuoteError;
use crate::types::{NearPrice, ParsedData, TickerPrice, FALLBACK_PRICE};

/// Binance NEAR/USDT spot ticker.
pub const BINANCE_NEAR_USDT_URL: &str =
    "https://api.binance.com/api/v3/ticker/price?symbol=NEARUSDT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the NEAR spot price.
pub struct PriceQuoteClient {
    http_client: reqwest::Client,
    url: String,
}

impl PriceQuoteClient {
    /// Client for the Binance ticker.
    pub fn new() -> Self {
        Self::with_url(BINANCE_NEAR_USDT_URL)
    }

    /// Client for a ticker endpoint answering with `{"price": "<decimal>"}`.
    pub fn with_url(url: impl Into<String>) -> Self {
        // reqwest::Client::new() is the infallible fallback
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current price as the exchange formats it.
    ///
    /// Never fails: request and parse failures are logged and reported as
    /// `"0"` with the failure in `error`. A body without a price is a plain
    /// `"0"`.
    pub async fn fetch(&self) -> ParsedData<String> {
        match self.request().await {
            Ok(price) => {
                debug!(price = %price, "NEAR price fetched");
                ParsedData::data(price)
            }
            Err(err) => {
                warn!(url = %self.url, error = %err, "Failed to retrieve near price");
                ParsedData::fallback(err.to_string())
            }
        }
    }

    /// Current price as a number.
    pub async fn near_price(&self) -> NearPrice {
        NearPrice::from_parsed(self.fetch().await)
    }

    async fn request(&self) -> Result<String, QuoteError> {
        let body = self.http_client.get(&self.url).send().await?.text().await?;
        parse_ticker(&body)
    }
}

impl Default for PriceQuoteClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the price from a ticker body. A missing or empty price is `"0"`.
pub(crate) fn parse_ticker(body: &str) -> Result<String, QuoteError> {
    let ticker: TickerPrice = serde_json::from_str(body)?;
    Ok(ticker
        .price
        .filter(|price| !price.is_empty())
        .unwrap_or_else(|| FALLBACK_PRICE.to_string()))
}
