use {
    crate::domain::{AssetPatch, AssetRecord, SortDirective},
    tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender},
};

pub use crate::data::ConnectionStatus;

/// Every state change the dashboard accepts. Adapters and the user only ever
/// talk to the engine through these.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Seed from the persisted snapshot (ignored when empty).
    LoadSnapshot(Vec<AssetRecord>),
    /// User asked for a fresh bulk fetch.
    Refresh,
    FetchSucceeded(Vec<AssetRecord>),
    FetchFailed(String),
    /// Single-asset update from the push channel. `external_id` is pre-alias.
    PriceUpdate {
        external_id: String,
        patch: AssetPatch,
    },
    SimulationTick,
    SetFilter(String),
    SetSort(SortDirective),
    ToggleSimulation,
    ToggleLiveUpdates,
    ConnectionChanged(ConnectionStatus),
    Shutdown,
}

pub type CommandSender = UnboundedSender<Command>;
pub type CommandReceiver = UnboundedReceiver<Command>;

/// Side effects the engine must reconcile after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// The asset collection changed (persist + republish).
    pub assets_changed: bool,
    /// Something visible changed (republish).
    pub view_changed: bool,
    pub spawn_fetch: bool,
    /// Simulation flag flipped; reconcile the ticker.
    pub simulation_toggled: bool,
    /// Live flag flipped; reconcile the push channel.
    pub live_toggled: bool,
    pub shutdown: bool,
}

impl Transition {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    pub(crate) fn assets() -> Self {
        Self {
            assets_changed: true,
            view_changed: true,
            ..Self::default()
        }
    }

    pub(crate) fn view() -> Self {
        Self {
            view_changed: true,
            ..Self::default()
        }
    }
}
