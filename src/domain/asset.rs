use {
    super::TrendSeries,
    crate::config::DemoAsset,
    rand::Rng,
    serde::{Deserialize, Serialize},
};

/// One tracked instrument's current market snapshot. `id` is the store key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "logo", default)]
    pub logo_url: Option<String>,
    pub price: f64,
    #[serde(rename = "change1h")]
    pub change_1h: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    #[serde(rename = "change7d")]
    pub change_7d: f64,
    pub market_cap: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    pub circulating_supply: f64,
    /// None => uncapped supply
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub trend_series: TrendSeries,
}

impl AssetRecord {
    pub(crate) fn from_demo<R: Rng + ?Sized>(demo: &DemoAsset, rng: &mut R) -> Self {
        Self {
            id: demo.id.to_string(),
            name: demo.name.to_string(),
            symbol: demo.symbol.to_string(),
            logo_url: Some(demo.logo.to_string()),
            price: demo.price,
            change_1h: demo.change_1h,
            change_24h: demo.change_24h,
            change_7d: demo.change_7d,
            market_cap: demo.market_cap,
            volume_24h: demo.volume_24h,
            circulating_supply: demo.circulating_supply,
            max_supply: demo.max_supply,
            trend_series: TrendSeries::for_change(demo.change_24h, rng),
        }
    }

    /// Field-level merge. Returns true if `change_24h` was among the patched fields,
    /// which is the caller's cue to regenerate the trend.
    pub(crate) fn merge(&mut self, patch: AssetPatch) -> bool {
        let AssetPatch {
            name,
            symbol,
            logo_url,
            price,
            change_1h,
            change_24h,
            change_7d,
            market_cap,
            volume_24h,
            circulating_supply,
            max_supply,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = symbol {
            self.symbol = v;
        }
        if let Some(v) = logo_url {
            self.logo_url = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = change_1h {
            self.change_1h = v;
        }
        if let Some(v) = change_24h {
            self.change_24h = v;
        }
        if let Some(v) = change_7d {
            self.change_7d = v;
        }
        if let Some(v) = market_cap {
            self.market_cap = v;
        }
        if let Some(v) = volume_24h {
            self.volume_24h = v;
        }
        if let Some(v) = circulating_supply {
            self.circulating_supply = v;
        }
        if let Some(v) = max_supply {
            self.max_supply = v;
        }

        change_24h.is_some()
    }
}

/// Partial update of an `AssetRecord`. `None` leaves the field untouched.
/// The trend series is deliberately absent: it follows `change_24h`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPatch {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub logo_url: Option<Option<String>>,
    pub price: Option<f64>,
    pub change_1h: Option<f64>,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    /// `Some(None)` clears the cap.
    pub max_supply: Option<Option<f64>>,
}

impl AssetPatch {
    pub fn price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    pub fn with_change_24h(mut self, change_24h: f64) -> Self {
        self.change_24h = Some(change_24h);
        self
    }

    /// Drops non-finite numbers and clamps negative magnitudes to zero.
    /// Percent changes are signed and only need to be finite.
    pub(crate) fn sanitized(self, id: &str) -> Self {
        let finite = |field: &str, v: Option<f64>| match v {
            Some(x) if !x.is_finite() => {
                log::warn!("Dropping non-finite {} for {}: {}", field, id, x);
                None
            }
            other => other,
        };
        let magnitude = |field: &str, v: Option<f64>| {
            finite(field, v).map(|x| {
                if x < 0.0 {
                    log::warn!("Clamping negative {} for {} to 0: {}", field, id, x);
                    0.0
                } else {
                    x
                }
            })
        };

        Self {
            price: magnitude("price", self.price),
            change_1h: finite("change_1h", self.change_1h),
            change_24h: finite("change_24h", self.change_24h),
            change_7d: finite("change_7d", self.change_7d),
            market_cap: magnitude("market_cap", self.market_cap),
            volume_24h: magnitude("volume_24h", self.volume_24h),
            circulating_supply: magnitude("circulating_supply", self.circulating_supply),
            max_supply: self.max_supply.and_then(|cap| match cap {
                None => Some(None),
                Some(x) => magnitude("max_supply", Some(x)).map(Some),
            }),
            ..self
        }
    }
}
