//! Live price channel configuration and the external id alias table.

pub struct CoinCapConfig {
    pub ws_base_url: &'static str,
    /// Asset ids (in CoinCap's naming) requested on connect.
    pub tracked_assets: &'static [&'static str],
}

pub const COINCAP: CoinCapConfig = CoinCapConfig {
    ws_base_url: "wss://ws.coincap.io/prices?assets=",
    tracked_assets: &[
        "bitcoin",
        "ethereum",
        "tether",
        "binancecoin",
        "ripple",
        "solana",
        "cardano",
        "polkadot",
        "dogecoin",
        "avalanche",
    ],
};

/// External (push channel) id -> canonical store id.
/// Ids missing from this table are used verbatim.
pub const ID_ALIASES: &[(&str, &str)] = &[
    ("bitcoin", "bitcoin"),
    ("ethereum", "ethereum"),
    ("tether", "tether"),
    ("binancecoin", "binancecoin"),
    ("ripple", "xrp"),
    ("solana", "solana"),
    ("cardano", "cardano"),
    ("polkadot", "polkadot"),
    ("dogecoin", "dogecoin"),
    ("avalanche", "avalanche-2"),
];

/// Ranges used to fabricate the fields the push channel does not carry.
pub struct PushSynthesisConfig {
    /// `(offset, scale)` pairs: `(U - offset) * scale * rf`
    pub change_1h: (f64, f64),
    pub change_24h: (f64, f64),
    pub change_7d: (f64, f64),
    /// Lower bound and width of the random-factor `rf` range.
    pub random_factor: (f64, f64),
    pub base_volume: f64,
    /// Base volume multiplier drawn from `[min, max)`.
    pub volume_multiplier: (f64, f64),
    /// Volume swing magnitude drawn from `[min, max)`, sign is a coin flip.
    pub volume_swing: (f64, f64),
}

pub const PUSH_SYNTHESIS: PushSynthesisConfig = PushSynthesisConfig {
    change_1h: (0.45, 2.0),
    change_24h: (0.4, 5.0),
    change_7d: (0.4, 10.0),
    random_factor: (0.5, 0.5),
    base_volume: 1_000_000_000.0,
    volume_multiplier: (1.0, 6.0),
    volume_swing: (0.01, 0.05),
};
