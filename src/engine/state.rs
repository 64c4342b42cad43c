use {
    super::{
        messages::{Command, ConnectionStatus, Transition},
        store::AssetStore,
    },
    crate::{
        config::COINGECKO,
        data::perturb_all,
        domain::{AssetRecord, SortDirective, TrendSeries},
        view::derive_view,
    },
    chrono::{DateTime, Local},
    rand::Rng,
};

/// Everything the dashboard knows. Mutated only through `apply`.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub store: AssetStore,
    pub filter: String,
    pub sort: SortDirective,
    pub simulation_active: bool,
    pub live_updates: bool,
    pub connection: ConnectionStatus,
}

impl DashboardState {
    pub fn new(simulation_active: bool, live_updates: bool) -> Self {
        Self {
            simulation_active,
            live_updates,
            ..Self::default()
        }
    }

    /// The single state-transition function. Returns which side effects the
    /// owner has to reconcile; never performs I/O itself.
    pub fn apply<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) -> Transition {
        match command {
            Command::LoadSnapshot(mut assets) => {
                if assets.is_empty() {
                    return Transition::none();
                }
                // Snapshots in the older layout carry no trend.
                for asset in assets.iter_mut().filter(|a| a.trend_series.is_empty()) {
                    asset.trend_series = TrendSeries::for_change(asset.change_24h, rng);
                }
                self.store.replace_all(assets);
                Transition::assets()
            }
            Command::Refresh => {
                self.store.mark_loading();
                Transition {
                    spawn_fetch: true,
                    ..Transition::view()
                }
            }
            Command::FetchSucceeded(assets) => {
                self.store.replace_all(assets);
                Transition::assets()
            }
            Command::FetchFailed(reason) => {
                log::error!("Bulk fetch failed: {}", reason);
                self.store.mark_error(COINGECKO.fetch_error_message);
                Transition::view()
            }
            Command::PriceUpdate { external_id, patch } => {
                // Stragglers from a channel that was just torn down.
                if !self.live_updates {
                    return Transition::none();
                }
                if self.store.patch(&external_id, patch, rng) {
                    Transition::assets()
                } else {
                    Transition::none()
                }
            }
            Command::SimulationTick => {
                // A tick that races a toggle-off is dropped.
                if !self.simulation_active || self.store.is_empty() {
                    return Transition::none();
                }
                let next = perturb_all(self.store.assets(), rng);
                self.store.replace_assets(next);
                Transition::assets()
            }
            Command::SetFilter(filter) => {
                self.filter = filter;
                Transition::view()
            }
            Command::SetSort(sort) => {
                self.sort = sort;
                Transition::view()
            }
            Command::ToggleSimulation => {
                self.simulation_active = !self.simulation_active;
                Transition {
                    simulation_toggled: true,
                    ..Transition::view()
                }
            }
            Command::ToggleLiveUpdates => {
                self.live_updates = !self.live_updates;
                Transition {
                    live_toggled: true,
                    ..Transition::view()
                }
            }
            Command::ConnectionChanged(status) => {
                if self.connection == status
                    || (!self.live_updates && status != ConnectionStatus::Disconnected)
                {
                    return Transition::none();
                }
                self.connection = status;
                Transition::view()
            }
            Command::Shutdown => Transition {
                shutdown: true,
                ..Transition::none()
            },
        }
    }

    /// Derived rows plus status, detached from the state so it can be published.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            rows: derive_view(self.store.assets(), &self.filter, &self.sort)
                .into_iter()
                .cloned()
                .collect(),
            total: self.store.len(),
            loading: self.store.is_loading(),
            loaded: self.store.is_loaded(),
            error: self.store.error().map(str::to_string),
            filter: self.filter.clone(),
            sort: self.sort,
            simulation_active: self.simulation_active,
            live_updates: self.live_updates,
            connection: self.connection,
            updated_at: Local::now(),
        }
    }
}

/// What the presentation layer gets to see.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub rows: Vec<AssetRecord>,
    /// Size of the unfiltered collection.
    pub total: usize,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
    pub filter: String,
    pub sort: SortDirective,
    pub simulation_active: bool,
    pub live_updates: bool,
    pub connection: ConnectionStatus,
    pub updated_at: DateTime<Local>,
}

impl Default for DashboardView {
    fn default() -> Self {
        DashboardState::default().view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TREND;
    use crate::domain::{AssetPatch, SortField, test_record};
    use rand::{SeedableRng, rngs::StdRng};

    fn loaded_state() -> (DashboardState, StdRng) {
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = DashboardState::default();
        state.apply(
            Command::FetchSucceeded(vec![
                test_record("bitcoin", "Bitcoin", "BTC", 50_000.0, 1e12),
                test_record("ethereum", "Ethereum", "ETH", 3_000.0, 4e11),
            ]),
            &mut rng,
        );
        (state, rng)
    }

    #[test]
    fn empty_snapshot_is_ignored() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = DashboardState::default();
        assert_eq!(state.apply(Command::LoadSnapshot(Vec::new()), &mut rng), Transition::none());
        assert!(!state.store.is_loaded());
    }

    #[test]
    fn refresh_marks_loading_and_asks_for_fetch() {
        let (mut state, mut rng) = loaded_state();
        let t = state.apply(Command::Refresh, &mut rng);
        assert!(t.spawn_fetch);
        assert!(state.store.is_loading());
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn failed_fetch_keeps_assets_and_sets_fixed_message() {
        let (mut state, mut rng) = loaded_state();
        state.apply(Command::Refresh, &mut rng);
        let t = state.apply(Command::FetchFailed("connection reset".into()), &mut rng);

        assert!(!t.assets_changed);
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.store.error(), Some(COINGECKO.fetch_error_message));
        assert!(!state.store.is_loading());
    }

    #[test]
    fn unknown_price_update_changes_nothing() {
        let (mut state, mut rng) = loaded_state();
        let before = state.store.assets().to_vec();
        let t = state.apply(
            Command::PriceUpdate {
                external_id: "dogecoin".into(),
                patch: AssetPatch::price(0.1),
            },
            &mut rng,
        );
        assert_eq!(t, Transition::none());
        assert_eq!(state.store.assets(), before.as_slice());
    }

    #[test]
    fn price_updates_need_live_updates_on() {
        let (mut state, mut rng) = loaded_state();
        let update = Command::PriceUpdate {
            external_id: "bitcoin".into(),
            patch: AssetPatch::price(55_000.0),
        };

        assert_eq!(state.apply(update.clone(), &mut rng), Transition::none());
        assert_eq!(state.store.get("bitcoin").map(|a| a.price), Some(50_000.0));

        state.apply(Command::ToggleLiveUpdates, &mut rng);
        assert!(state.apply(update, &mut rng).assets_changed);
        assert_eq!(state.store.get("bitcoin").map(|a| a.price), Some(55_000.0));
    }

    #[test]
    fn stale_connection_events_are_ignored_while_off() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = DashboardState::new(false, false);
        let t = state.apply(Command::ConnectionChanged(ConnectionStatus::Connected), &mut rng);
        assert_eq!(t, Transition::none());
        assert_eq!(state.connection, ConnectionStatus::Disconnected);
    }

    #[test]
    fn snapshot_without_trends_gets_fresh_ones() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = DashboardState::default();
        let mut kept = test_record("ethereum", "Ethereum", "ETH", 3_000.0, 4e11);
        kept.trend_series = TrendSeries::generate(false, &mut rng);

        state.apply(
            Command::LoadSnapshot(vec![
                test_record("bitcoin", "Bitcoin", "BTC", 50_000.0, 1e12),
                kept.clone(),
            ]),
            &mut rng,
        );

        let bitcoin = state.store.get("bitcoin").map(|a| a.trend_series.points().len());
        assert_eq!(bitcoin, Some(TREND.points));
        assert_eq!(state.store.get("ethereum"), Some(&kept));
    }

    #[test]
    fn simulation_tick_keeps_fetch_error_and_loading() {
        let (mut state, mut rng) = loaded_state();
        state.apply(Command::Refresh, &mut rng);
        state.apply(Command::FetchFailed("timeout".into()), &mut rng);
        state.apply(Command::ToggleSimulation, &mut rng);

        let before = state.store.assets().to_vec();
        assert!(state.apply(Command::SimulationTick, &mut rng).assets_changed);
        assert_ne!(state.store.assets(), before.as_slice());
        assert_eq!(state.store.error(), Some(COINGECKO.fetch_error_message));

        state.apply(Command::Refresh, &mut rng);
        state.apply(Command::SimulationTick, &mut rng);
        assert!(state.store.is_loading());
        assert!(state.view().loading);
    }

    #[test]
    fn simulation_tick_only_runs_while_active() {
        let (mut state, mut rng) = loaded_state();
        let before = state.store.assets().to_vec();

        assert_eq!(state.apply(Command::SimulationTick, &mut rng), Transition::none());
        assert_eq!(state.store.assets(), before.as_slice());

        state.apply(Command::ToggleSimulation, &mut rng);
        let t = state.apply(Command::SimulationTick, &mut rng);
        assert!(t.assets_changed);
        assert_ne!(state.store.assets(), before.as_slice());
    }

    #[test]
    fn toggles_flip_flags_and_request_reconcile() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = DashboardState::new(false, true);

        let t = state.apply(Command::ToggleLiveUpdates, &mut rng);
        assert!(t.live_toggled && !state.live_updates);

        let t = state.apply(Command::ToggleSimulation, &mut rng);
        assert!(t.simulation_toggled && state.simulation_active);
    }

    #[test]
    fn view_reflects_filter_and_sort() {
        let (mut state, mut rng) = loaded_state();
        state.apply(Command::SetSort(SortDirective::ascending(SortField::Price)), &mut rng);
        let ids: Vec<_> = state.view().rows.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, ["ethereum", "bitcoin"]);

        state.apply(Command::SetFilter("bit".into()), &mut rng);
        let view = state.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.total, 2);
    }
}
