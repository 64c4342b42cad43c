pub struct DemoAsset {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub logo: &'static str,
    pub price: f64,
    pub change_1h: f64,
    pub change_24h: f64,
    pub change_7d: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,
    pub max_supply: Option<f64>,
}

pub struct DemoConfig {
    /// Simulation starts ticking as soon as demo data is loaded.
    pub simulation_on_start: bool,
    pub assets: &'static [DemoAsset],
}

pub const DEMO: DemoConfig = DemoConfig {
    simulation_on_start: true,
    assets: &[
        DemoAsset {
            id: "bitcoin",
            name: "Bitcoin",
            symbol: "BTC",
            logo: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            price: 60243.52,
            change_1h: 0.45,
            change_24h: 1.32,
            change_7d: 5.67,
            market_cap: 1_185_632_547_896.0,
            volume_24h: 28_754_123_654.0,
            circulating_supply: 19_678_450.0,
            max_supply: Some(21_000_000.0),
        },
        DemoAsset {
            id: "ethereum",
            name: "Ethereum",
            symbol: "ETH",
            logo: "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
            price: 3245.18,
            change_1h: -0.23,
            change_24h: 2.15,
            change_7d: -1.42,
            market_cap: 389_452_187_635.0,
            volume_24h: 15_784_236_547.0,
            circulating_supply: 120_032_541.0,
            max_supply: None,
        },
        DemoAsset {
            id: "tether",
            name: "Tether",
            symbol: "USDT",
            logo: "https://assets.coingecko.com/coins/images/325/large/tether.png",
            price: 1.00,
            change_1h: 0.01,
            change_24h: -0.05,
            change_7d: 0.02,
            market_cap: 105_842_367_895.0,
            volume_24h: 52_741_236_985.0,
            circulating_supply: 105_842_367_895.0,
            max_supply: None,
        },
        DemoAsset {
            id: "binancecoin",
            name: "Binance Coin",
            symbol: "BNB",
            logo: "https://assets.coingecko.com/coins/images/825/large/bnb-icon2_2x.png",
            price: 605.72,
            change_1h: 0.78,
            change_24h: -1.05,
            change_7d: 3.21,
            market_cap: 93_254_123_654.0,
            volume_24h: 3_254_789_654.0,
            circulating_supply: 153_854_120.0,
            max_supply: Some(200_000_000.0),
        },
        DemoAsset {
            id: "ripple",
            name: "XRP",
            symbol: "XRP",
            logo: "https://assets.coingecko.com/coins/images/44/large/xrp-symbol-white-128.png",
            price: 0.52,
            change_1h: -0.35,
            change_24h: -2.45,
            change_7d: -4.78,
            market_cap: 28_457_891_235.0,
            volume_24h: 1_245_789_632.0,
            circulating_supply: 54_752_145_879.0,
            max_supply: Some(100_000_000_000.0),
        },
    ],
};
