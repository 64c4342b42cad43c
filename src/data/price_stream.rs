use {
    crate::{
        config::{COINCAP, PUSH_SYNTHESIS},
        domain::AssetPatch,
        engine::{Command, CommandSender},
    },
    async_trait::async_trait,
    futures::StreamExt,
    rand::Rng,
    std::{collections::HashMap, sync::Arc},
    thiserror::Error,
    tokio::task::JoinHandle,
    tokio_tungstenite::{connect_async, tungstenite::Message},
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    #[default]
    Disconnected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Connected => write!(f, "● live"),
            ConnectionStatus::Connecting => write!(f, "◌ connecting"),
            ConnectionStatus::Disconnected => write!(f, "○ offline"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("WebSocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Where the channel delivers price events. Wraps the engine's command queue.
#[derive(Clone)]
pub struct UpdateSink {
    tx: CommandSender,
}

impl UpdateSink {
    pub fn new(tx: CommandSender) -> Self {
        Self { tx }
    }

    /// Returns false once the engine has gone away.
    pub fn status(&self, status: ConnectionStatus) -> bool {
        self.tx.send(Command::ConnectionChanged(status)).is_ok()
    }

    /// Turns a raw text frame into one `PriceUpdate` per asset.
    /// A malformed frame is logged and dropped whole.
    pub fn frame(&self, text: &str) -> bool {
        let prices = match parse_price_frame(text) {
            Ok(prices) => prices,
            Err(e) => {
                log::warn!("⚠️ Failed to parse price frame: {}", e);
                return true;
            }
        };

        let mut rng = rand::thread_rng();
        for (external_id, price) in prices {
            #[cfg(debug_assertions)]
            if DF.log_price_stream_updates {
                log::info!("[price-tick] {} -> {:.6}", external_id, price);
            }

            let patch = synthesize_patch(price, &mut rng);
            if self.tx.send(Command::PriceUpdate { external_id, patch }).is_err() {
                return false;
            }
        }
        true
    }
}

/// A long-lived push source. Delivery, ordering and reconnection are its concern;
/// `run` returns when the channel closes.
#[async_trait]
pub trait PriceChannel: Send + Sync {
    async fn run(&self, sink: UpdateSink) -> Result<(), FeedError>;
}

/// CoinCap `prices` socket: frames look like `{"bitcoin":"60123.45","ethereum":"3210.9"}`.
pub struct CoinCapChannel {
    url: String,
}

impl CoinCapChannel {
    pub fn new(assets: &[&str]) -> Self {
        Self {
            url: format!("{}{}", COINCAP.ws_base_url, assets.join(",")),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for CoinCapChannel {
    fn default() -> Self {
        Self::new(COINCAP.tracked_assets)
    }
}

#[async_trait]
impl PriceChannel for CoinCapChannel {
    async fn run(&self, sink: UpdateSink) -> Result<(), FeedError> {
        #[cfg(debug_assertions)]
        if DF.log_price_stream_updates {
            log::info!("Attempting connection to {}", self.url);
        }

        let (ws_stream, _) = connect_async(self.url.as_str()).await?;
        log::info!("Price channel connected");
        if !sink.status(ConnectionStatus::Connected) {
            return Ok(());
        }

        let (_write, mut read) = ws_stream.split();

        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if !sink.frame(&text) {
                        break;
                    }
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    break;
                }
                Err(e) => {
                    log::error!("WebSocket error: {}", e);
                    return Err(e.into());
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Running push channel. Aborting (stop or drop) tears the connection down;
/// a new `LiveFeed` always opens a fresh one.
pub struct LiveFeed {
    handle: JoinHandle<()>,
}

impl LiveFeed {
    pub fn spawn(channel: Arc<dyn PriceChannel>, tx: CommandSender) -> Self {
        let sink = UpdateSink::new(tx);
        let handle = tokio::spawn(async move {
            sink.status(ConnectionStatus::Connecting);
            match channel.run(sink.clone()).await {
                Ok(()) => log::warn!("Price channel closed. Toggle live updates to reconnect."),
                Err(e) => log::error!("Price channel failed: {}. Toggle live updates to retry.", e),
            }
            sink.status(ConnectionStatus::Disconnected);
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Tears the connection down now rather than at the end of scope.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("frame is not a JSON object: {0}")]
    NotAnObject(String),
    #[error("bad price for '{id}': {raw}")]
    BadPrice { id: String, raw: String },
}

/// `{id: price}` where price is a numeric string or a number.
pub fn parse_price_frame(text: &str) -> Result<Vec<(String, f64)>, FrameError> {
    let map: HashMap<String, serde_json::Value> =
        serde_json::from_str(text).map_err(|e| FrameError::NotAnObject(e.to_string()))?;

    let mut prices = map
        .into_iter()
        .map(|(id, raw)| {
            let price = match &raw {
                serde_json::Value::String(s) => s.parse::<f64>().ok(),
                serde_json::Value::Number(n) => n.as_f64(),
                _ => None,
            };
            match price {
                Some(p) if p.is_finite() && p >= 0.0 => Ok((id, p)),
                _ => Err(FrameError::BadPrice {
                    id,
                    raw: raw.to_string(),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    // HashMap order is arbitrary; keep patches deterministic.
    prices.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(prices)
}

/// The channel only carries price, so the percentage changes and volume are
/// fabricated around it.
pub fn synthesize_patch<R: Rng + ?Sized>(price: f64, rng: &mut R) -> AssetPatch {
    let cfg = &PUSH_SYNTHESIS;
    let random_factor = cfg.random_factor.0 + rng.gen_range(0.0..cfg.random_factor.1);
    let mut change = |(offset, scale): (f64, f64)| (rng.gen_range(0.0..1.0) - offset) * scale * random_factor;

    let change_1h = change(cfg.change_1h);
    let change_24h = change(cfg.change_24h);
    let change_7d = change(cfg.change_7d);

    let swing = rng.gen_range(cfg.volume_swing.0..cfg.volume_swing.1);
    let swing = if rng.gen_bool(0.5) { swing } else { -swing };
    let base_volume = cfg.base_volume * rng.gen_range(cfg.volume_multiplier.0..cfg.volume_multiplier.1);

    AssetPatch {
        price: Some(price),
        change_1h: Some(change_1h),
        change_24h: Some(change_24h),
        change_7d: Some(change_7d),
        volume_24h: Some(base_volume * (1.0 + swing)),
        ..Default::default()
    }
}
