mod price_stream;
mod provider;
mod simulation;
mod storage;

pub use {
    price_stream::{
        CoinCapChannel, ConnectionStatus, FeedError, FrameError, LiveFeed, PriceChannel,
        UpdateSink, parse_price_frame, synthesize_patch,
    },
    provider::{CoinGeckoProvider, FetchError, MarketDataProvider, MarketRow, parse_markets},
    simulation::{SimulationTicker, perturb, perturb_all},
    storage::{JsonFileStore, MemoryStore, Snapshot, SnapshotStore},
};
