use {
    crate::{
        config::{COINGECKO, CoinGeckoConfig},
        domain::{AssetRecord, TrendSeries},
    },
    async_trait::async_trait,
    rand::Rng,
    reqwest::Client,
    serde::Deserialize,
    std::time::Duration,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Market data API returned status {0}")]
    Status(u16),

    #[error("Failed to decode market data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstract interface for the one-shot bulk market listing.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// The full listing, already in `AssetRecord` shape, or nothing at all.
    async fn fetch_markets(&self) -> Result<Vec<AssetRecord>, FetchError>;
}

/// One row of the `/coins/markets` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketRow {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub image: Option<String>,
    pub current_price: f64,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    pub market_cap: f64,
    pub total_volume: f64,
    pub circulating_supply: f64,
    #[serde(default)]
    pub max_supply: Option<f64>,
}

impl MarketRow {
    pub fn into_record<R: Rng + ?Sized>(self, rng: &mut R) -> AssetRecord {
        let change_24h = self.price_change_percentage_24h_in_currency.unwrap_or(0.0);
        AssetRecord {
            id: self.id,
            name: self.name,
            symbol: self.symbol.to_uppercase(),
            logo_url: self.image,
            price: self.current_price,
            change_1h: self.price_change_percentage_1h_in_currency.unwrap_or(0.0),
            change_24h,
            change_7d: self.price_change_percentage_7d_in_currency.unwrap_or(0.0),
            market_cap: self.market_cap,
            volume_24h: self.total_volume,
            circulating_supply: self.circulating_supply,
            max_supply: self.max_supply,
            trend_series: TrendSeries::for_change(change_24h, rng),
        }
    }
}

/// Parses a complete listing body. Any malformed row fails the whole body.
pub fn parse_markets<R: Rng + ?Sized>(body: &[u8], rng: &mut R) -> Result<Vec<AssetRecord>, FetchError> {
    let rows: Vec<MarketRow> = serde_json::from_slice(body)?;
    Ok(rows.into_iter().map(|row| row.into_record(rng)).collect())
}

pub struct CoinGeckoProvider {
    client: Client,
    config: &'static CoinGeckoConfig,
}

impl CoinGeckoProvider {
    pub fn new() -> Result<Self, FetchError> {
        let config = &COINGECKO;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.client.timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_markets(&self) -> Result<Vec<AssetRecord>, FetchError> {
        let m = &self.config.markets;
        let response = self
            .client
            .get(m.url)
            .query(&[
                ("vs_currency", m.vs_currency.to_string()),
                ("order", m.order.to_string()),
                ("per_page", m.per_page.to_string()),
                ("page", m.page.to_string()),
                ("sparkline", "false".to_string()),
                ("price_change_percentage", m.price_change_percentage.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_markets(&body, &mut rand::thread_rng())
    }
}
