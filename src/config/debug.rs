//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Emit verbose logging for live price channel connections and frames.
    pub log_price_stream_updates: bool,

    /// Emit simulation-mode state changes (start/stop, every tick).
    pub log_simulation_events: bool,

    /// Log every snapshot write.
    pub log_persistence: bool,

    /// Log each command as the engine dequeues it.
    pub log_engine_core: bool,

    /// Log patches that matched no asset.
    pub log_unmatched_patches: bool,
}

pub const DF: LogFlags = LogFlags {
    log_unmatched_patches: true,

    log_price_stream_updates: false,
    log_simulation_events: false,
    log_persistence: false,
    log_engine_core: false,
};
