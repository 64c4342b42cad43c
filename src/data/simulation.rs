use {
    crate::{
        config::SIMULATION,
        domain::{AssetRecord, TrendSeries},
        engine::{Command, CommandSender},
    },
    rand::Rng,
    std::time::Duration,
    tokio::{
        task::JoinHandle,
        time::{Instant, MissedTickBehavior, interval_at},
    },
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// One simulation step for a single asset: small independent moves on price,
/// the three change percentages and volume, then a fresh trend.
pub fn perturb<R: Rng + ?Sized>(asset: &AssetRecord, rng: &mut R) -> AssetRecord {
    let jitter = |rng: &mut R, max: f64| rng.gen_range(-max..max);

    let price = asset.price * (1.0 + jitter(rng, SIMULATION.price_jitter));
    let change_1h = asset.change_1h + jitter(rng, SIMULATION.change_1h_jitter);
    let change_24h = asset.change_24h + jitter(rng, SIMULATION.change_24h_jitter);
    let change_7d = asset.change_7d + jitter(rng, SIMULATION.change_7d_jitter);
    let volume_24h = asset.volume_24h * (1.0 + jitter(rng, SIMULATION.volume_jitter));

    AssetRecord {
        price,
        change_1h,
        change_24h,
        change_7d,
        volume_24h,
        trend_series: TrendSeries::for_change(change_24h, rng),
        ..asset.clone()
    }
}

pub fn perturb_all<R: Rng + ?Sized>(assets: &[AssetRecord], rng: &mut R) -> Vec<AssetRecord> {
    assets.iter().map(|a| perturb(a, rng)).collect()
}

/// Recurring simulation timer. Sends `Command::SimulationTick` every period
/// until stopped; dropping it stops it too.
#[derive(Default)]
pub struct SimulationTicker {
    handle: Option<JoinHandle<()>>,
}

impl SimulationTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Starts ticking (first tick one period from now). Any previous timer is aborted first.
    pub fn start(&mut self, tx: CommandSender, period: Duration) {
        self.stop();

        #[cfg(debug_assertions)]
        if DF.log_simulation_events {
            log::info!("Simulation started ({:?} ticks)", period);
        }

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(Command::SimulationTick).is_err() {
                    // Engine is gone.
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();

            #[cfg(debug_assertions)]
            if DF.log_simulation_events {
                log::info!("Simulation stopped");
            }
        }
    }
}

impl Drop for SimulationTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
