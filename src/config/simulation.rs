use std::time::Duration;

pub struct SimulationConfig {
    pub tick_interval: Duration,
    /// Max relative price move per tick (0.02 = ±2%).
    pub price_jitter: f64,
    /// Max additive jitter per tick on the 1h / 24h / 7d change percentages.
    pub change_1h_jitter: f64,
    pub change_24h_jitter: f64,
    pub change_7d_jitter: f64,
    /// Max relative volume move per tick (0.01 = ±1%).
    pub volume_jitter: f64,
}

pub const SIMULATION: SimulationConfig = SimulationConfig {
    tick_interval: Duration::from_secs(2),
    price_jitter: 0.02,
    change_1h_jitter: 0.2,
    change_24h_jitter: 0.4,
    change_7d_jitter: 0.6,
    volume_jitter: 0.01,
};

/// Shape of the generated trend line (mini chart).
pub struct TrendConfig {
    pub points: usize,
    pub start: f64,
    pub min: f64,
    pub max: f64,
    pub bias: f64,
    pub jitter: f64,
}

pub const TREND: TrendConfig = TrendConfig {
    points: 24,
    start: 50.0,
    min: 10.0,
    max: 90.0,
    bias: 1.5,
    jitter: 5.0,
};
