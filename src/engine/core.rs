use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::{mpsc::unbounded_channel, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::{PERSISTENCE, SIMULATION};
use crate::data::{
    ConnectionStatus, LiveFeed, MarketDataProvider, PriceChannel, SimulationTicker, Snapshot,
    SnapshotStore,
};

#[cfg(debug_assertions)]
use crate::config::DF;

use super::messages::{Command, CommandReceiver, CommandSender, Transition};
use super::state::{DashboardState, DashboardView};

/// Owns the dashboard state and is its only writer. Every adapter talks to it
/// through the command queue, so mutations happen strictly in arrival order.
pub struct Dashboard {
    state: DashboardState,
    rng: StdRng,

    // Command queue (adapters and the user write, the engine reads)
    tx: CommandSender,
    rx: CommandReceiver,

    /// Latest derived view for the presentation layer
    view_tx: watch::Sender<DashboardView>,

    // Sources. Optional so demo sessions can run fully offline.
    provider: Option<Arc<dyn MarketDataProvider>>,
    channel: Option<Arc<dyn PriceChannel>>,
    storage: Box<dyn SnapshotStore>,
    last_save: Option<Instant>,
    unsaved: bool,

    // Running background work
    simulation: SimulationTicker,
    live_feed: Option<LiveFeed>,
    fetch_task: Option<JoinHandle<()>>,
}

impl Dashboard {
    pub fn new(state: DashboardState, storage: Box<dyn SnapshotStore>) -> Self {
        let (tx, rx) = unbounded_channel();
        let (view_tx, _) = watch::channel(state.view());
        Self {
            state,
            rng: StdRng::from_entropy(),
            tx,
            rx,
            view_tx,
            provider: None,
            channel: None,
            storage,
            last_save: None,
            unsaved: false,
            simulation: SimulationTicker::new(),
            live_feed: None,
            fetch_task: None,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn MarketDataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_channel(mut self, channel: Arc<dyn PriceChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Fixes the random source (simulation, trends, synthesized fields).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Handle for adapters and the UI to enqueue commands.
    pub fn sender(&self) -> CommandSender {
        self.tx.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view_tx.subscribe()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn is_simulating(&self) -> bool {
        self.simulation.is_running()
    }

    pub fn has_live_feed(&self) -> bool {
        self.live_feed.as_ref().is_some_and(LiveFeed::is_running)
    }

    /// Session start: seed from the snapshot, kick off the first fetch and
    /// bring the background tasks in line with the initial toggles.
    pub fn start(&mut self) {
        match self.storage.load() {
            Ok(Some(snapshot)) => {
                log::info!("Restored {} assets from snapshot", snapshot.assets.len());
                self.handle(Command::LoadSnapshot(snapshot.assets));
            }
            Ok(None) => {}
            Err(e) => log::warn!("Discarding unreadable snapshot: {:#}", e),
        }

        if self.provider.is_some() {
            self.handle(Command::Refresh);
        }

        self.reconcile_simulation();
        self.reconcile_live_feed();
        self.publish();
    }

    /// Applies one command and reconciles its side effects.
    /// Returns false once the session should end.
    pub fn handle(&mut self, command: Command) -> bool {
        #[cfg(debug_assertions)]
        if DF.log_engine_core {
            log::info!("ENGINE: {:?}", command);
        }

        let transition: Transition = self.state.apply(command, &mut self.rng);

        if transition.shutdown {
            self.teardown();
            self.publish();
            return false;
        }
        if transition.spawn_fetch {
            self.spawn_fetch();
        }
        if transition.simulation_toggled {
            self.reconcile_simulation();
        }
        if transition.live_toggled {
            self.reconcile_live_feed();
        }
        if transition.assets_changed {
            self.persist();
        }
        if transition.view_changed {
            self.publish();
        }
        true
    }

    /// Drains whatever is already queued without waiting. Returns how many
    /// commands were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(command) = self.rx.try_recv() {
            handled += 1;
            if !self.handle(command) {
                break;
            }
        }
        handled
    }

    /// Event loop: runs until `Command::Shutdown`.
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            if !self.handle(command) {
                break;
            }
        }
        self.teardown();
    }

    fn spawn_fetch(&mut self) {
        let Some(provider) = self.provider.clone() else {
            log::warn!("Refresh requested but no market data source is configured");
            self.handle(Command::FetchFailed("no market data provider".into()));
            return;
        };

        // Latest refresh wins.
        if let Some(previous) = self.fetch_task.take() {
            previous.abort();
        }

        let tx = self.tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let command = match provider.fetch_markets().await {
                Ok(assets) => {
                    log::info!("Fetched {} assets", assets.len());
                    Command::FetchSucceeded(assets)
                }
                Err(e) => Command::FetchFailed(e.to_string()),
            };
            let _ = tx.send(command);
        }));
    }

    fn reconcile_simulation(&mut self) {
        if self.state.simulation_active {
            if !self.simulation.is_running() {
                self.simulation.start(self.tx.clone(), SIMULATION.tick_interval);
            }
        } else {
            self.simulation.stop();
        }
    }

    fn reconcile_live_feed(&mut self) {
        if self.state.live_updates {
            let Some(channel) = self.channel.clone() else {
                log::warn!("Live updates requested but no price channel is configured");
                return;
            };
            // Always a fresh connection; the old one (if any) is stopped first.
            if let Some(old) = self.live_feed.take() {
                old.stop();
            }
            self.live_feed = Some(LiveFeed::spawn(channel, self.tx.clone()));
        } else if let Some(feed) = self.live_feed.take() {
            feed.stop();
            self.state.connection = ConnectionStatus::Disconnected;
        }
    }

    /// Writes the snapshot at most once per `min_save_interval`. A change
    /// inside the window is only marked and goes out with the next write.
    fn persist(&mut self) {
        self.unsaved = true;
        let due = self
            .last_save
            .is_none_or(|at| at.elapsed() >= PERSISTENCE.app.min_save_interval);
        if due {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if !self.unsaved || self.state.store.is_empty() {
            return;
        }
        let snapshot = Snapshot {
            assets: self.state.store.assets().to_vec(),
        };
        match self.storage.save(&snapshot) {
            Ok(()) => {
                #[cfg(debug_assertions)]
                if DF.log_persistence {
                    log::info!("Snapshot saved ({} assets)", snapshot.assets.len());
                }
            }
            Err(e) => log::error!("Could not save snapshot: {:#}", e),
        }
        self.unsaved = false;
        self.last_save = Some(Instant::now());
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.state.view());
    }

    fn teardown(&mut self) {
        self.simulation.stop();
        if let Some(feed) = self.live_feed.take() {
            feed.stop();
            self.state.connection = ConnectionStatus::Disconnected;
        }
        self.flush();
        if let Some(fetch) = self.fetch_task.take() {
            fetch.abort();
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}
