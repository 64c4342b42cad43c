//! Configuration module for the tracker.

// Can all be private now because we have a public re-export.
mod coingecko;
mod debug;
mod demo;
mod feeds;
mod persistence;
mod simulation;

// Re-export commonly used items
pub use coingecko::{COINGECKO, CoinGeckoConfig};
pub use debug::DF;
pub use demo::{DEMO, DemoAsset};
pub use feeds::{COINCAP, ID_ALIASES, PUSH_SYNTHESIS};
pub use persistence::PERSISTENCE;
pub use simulation::{SIMULATION, TREND};
