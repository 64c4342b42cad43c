#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod utils;
pub mod view;

// Re-export commonly used types outside of crate (for main.rs and tests/)
pub use app::build_dashboard;
pub use domain::{AssetPatch, AssetRecord, SortDirection, SortDirective, SortField, TrendSeries};
pub use engine::{AssetStore, Command, Dashboard, DashboardState, DashboardView};
pub use view::derive_view;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run on built-in demo assets with the price simulation instead of live market data
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Do not open the live price channel on start-up (toggle later with `live`)
    #[arg(long, default_value_t = false)]
    pub no_live: bool,

    /// Initial name/symbol filter
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Initial sort field (camelCase field name, e.g. price, marketCap, change24h)
    #[arg(long, default_value_t = SortField::MarketCap)]
    pub sort: SortField,

    /// Sort ascending instead of descending
    #[arg(long, default_value_t = false)]
    pub ascending: bool,

    /// Where the asset snapshot is persisted (tracker mode only)
    #[arg(long)]
    pub state_path: Option<PathBuf>,

    /// Seed for the simulation / trend random source
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum seconds between automatic redraws
    #[arg(long, default_value_t = 2)]
    pub render_secs: u64,
}
