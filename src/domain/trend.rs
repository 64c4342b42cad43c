use {
    crate::config::TREND,
    rand::Rng,
    serde::{Deserialize, Serialize},
};

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Recent price direction as a short series of chart heights in `[TREND.min, TREND.max]`.
/// Purely cosmetic: regenerated from the sign of the 24h change, never from real history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendSeries(Vec<f64>);

impl TrendSeries {
    /// Random walk biased up (`positive`) or down, clamped to the chart bounds.
    pub fn generate<R: Rng + ?Sized>(positive: bool, rng: &mut R) -> Self {
        let bias = if positive { TREND.bias } else { -TREND.bias };
        let mut value = TREND.start;

        let points = (0..TREND.points)
            .map(|_| {
                let fluctuation = rng.gen_range(-TREND.jitter..TREND.jitter);
                value = (value + fluctuation + bias).clamp(TREND.min, TREND.max);
                value
            })
            .collect();

        Self(points)
    }

    /// Trend for a given 24h change (zero counts as positive).
    pub fn for_change<R: Rng + ?Sized>(change_24h: f64, rng: &mut R) -> Self {
        Self::generate(change_24h >= 0.0, rng)
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One block character per point, scaled to the chart bounds.
    pub fn sparkline(&self) -> String {
        let span = TREND.max - TREND.min;
        self.0
            .iter()
            .map(|v| {
                let t = ((v - TREND.min) / span).clamp(0.0, 1.0);
                SPARK_BARS[(t * (SPARK_BARS.len() - 1) as f64).round() as usize]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn generated_series_has_fixed_length_and_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for positive in [true, false] {
            let series = TrendSeries::generate(positive, &mut rng);
            assert_eq!(series.points().len(), TREND.points);
            assert!(
                series
                    .points()
                    .iter()
                    .all(|v| (TREND.min..=TREND.max).contains(v))
            );
        }
    }

    #[test]
    fn bias_drives_the_walk() {
        // Bias of 1.5 per step over 24 steps beats the jitter on average.
        let mut rng = StdRng::seed_from_u64(42);
        let (mut up_ends, mut down_ends) = (0.0, 0.0);
        for _ in 0..50 {
            up_ends += *TrendSeries::generate(true, &mut rng).points().last().unwrap();
            down_ends += *TrendSeries::generate(false, &mut rng).points().last().unwrap();
        }
        assert!(up_ends / 50.0 > TREND.start);
        assert!(down_ends / 50.0 < TREND.start);
    }

    #[test]
    fn sparkline_maps_bounds_to_lowest_and_highest_bar() {
        let series = TrendSeries(vec![TREND.min, TREND.max]);
        assert_eq!(series.sparkline(), "▁█");
    }
}
