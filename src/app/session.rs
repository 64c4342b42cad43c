use {
    crate::{
        Cli,
        config::{DEMO, PERSISTENCE},
        data::{CoinCapChannel, CoinGeckoProvider, JsonFileStore, MemoryStore, Snapshot},
        domain::{AssetRecord, SortDirection, SortDirective},
        engine::{Dashboard, DashboardState},
    },
    anyhow::{Context, Result},
    rand::Rng,
    std::{path::PathBuf, sync::Arc},
};

/// The built-in demo assets with freshly generated trends.
pub fn demo_snapshot<R: Rng + ?Sized>(rng: &mut R) -> Snapshot {
    Snapshot {
        assets: DEMO
            .assets
            .iter()
            .map(|demo| AssetRecord::from_demo(demo, rng))
            .collect(),
    }
}

/// Wires a dashboard for the requested mode.
///
/// Tracker mode: JSON snapshot on disk, CoinGecko listing, CoinCap live prices.
/// Demo mode: in-memory demo assets with the simulation running, no network.
pub fn build_dashboard(args: &Cli) -> Result<Dashboard> {
    let direction = if args.ascending {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    let dashboard = if args.demo {
        let mut state = DashboardState::new(DEMO.simulation_on_start, false);
        state.filter = args.filter.clone();
        state.sort = SortDirective::new(args.sort, direction);

        let store = MemoryStore::with_snapshot(demo_snapshot(&mut rand::thread_rng()));
        Dashboard::new(state, Box::new(store))
    } else {
        let mut state = DashboardState::new(false, !args.no_live);
        state.filter = args.filter.clone();
        state.sort = SortDirective::new(args.sort, direction);

        let path = args
            .state_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(PERSISTENCE.app.state_path));
        let storage = JsonFileStore::new(path);
        log::info!("Snapshot file: {}", storage.path().display());

        let provider =
            CoinGeckoProvider::new().context("Failed to build market data HTTP client")?;

        Dashboard::new(state, Box::new(storage))
            .with_provider(Arc::new(provider))
            .with_channel(Arc::new(CoinCapChannel::default()))
    };

    Ok(match args.seed {
        Some(seed) => dashboard.with_seed(seed),
        None => dashboard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortField;
    use clap::Parser;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn demo_snapshot_matches_config() {
        let snapshot = demo_snapshot(&mut StdRng::seed_from_u64(1));
        let symbols: Vec<_> = snapshot.assets.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "ETH", "USDT", "BNB", "XRP"]);
        assert!(snapshot.assets.iter().all(|a| !a.trend_series.is_empty()));
        assert_eq!(snapshot.assets[1].max_supply, None);
    }

    #[tokio::test]
    async fn demo_session_starts_offline_with_simulation() {
        let args = Cli::parse_from(["coin-tracker", "--demo", "--sort", "price", "--ascending"]);
        let mut dashboard = build_dashboard(&args).unwrap();
        dashboard.start();

        let state = dashboard.state();
        assert_eq!(state.store.len(), DEMO.assets.len());
        assert!(state.simulation_active);
        assert!(!state.live_updates);
        assert!(dashboard.is_simulating());
        assert!(!dashboard.has_live_feed());
        assert_eq!(state.sort, SortDirective::ascending(SortField::Price));
        assert_eq!(dashboard.subscribe().borrow().rows[0].symbol, "XRP");
    }
}
