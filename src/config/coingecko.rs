pub struct MarketsEndpoint {
    pub url: &'static str,
    pub vs_currency: &'static str,
    pub order: &'static str,
    pub per_page: u32,
    pub page: u32,
    pub price_change_percentage: &'static str,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
}

pub struct CoinGeckoConfig {
    pub markets: MarketsEndpoint,
    pub client: ClientDefaults,
    /// Shown to the user whenever the bulk fetch fails, whatever the cause.
    pub fetch_error_message: &'static str,
}

pub const COINGECKO: CoinGeckoConfig = CoinGeckoConfig {
    markets: MarketsEndpoint {
        url: "https://api.coingecko.com/api/v3/coins/markets",
        vs_currency: "usd",
        order: "market_cap_desc",
        per_page: 20,
        page: 1,
        price_change_percentage: "1h,24h,7d",
    },
    client: ClientDefaults { timeout_ms: 10_000 },
    fetch_error_message: "Failed to fetch crypto data. Please try again later.",
};
