//! File persistence configuration

use std::time::Duration;

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading the asset snapshot
    pub state_path: &'static str,
    /// Minimum gap between snapshot writes. Changes inside the gap are
    /// written by the next save after it, or at shutdown.
    pub min_save_interval: Duration,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub app: AppPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    app: AppPersistenceConfig {
        state_path: ".crypto_tracker_state.json",
        min_save_interval: Duration::from_secs(1),
    },
};
