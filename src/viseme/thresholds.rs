//! Adaptive energy thresholds.

/// Classification cut points taken from the observed energy distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// 25th percentile.
    pub silence: f64,
    /// 50th percentile.
    pub low: f64,
    /// 75th percentile.
    pub medium: f64,
    /// Every frame carried the same energy.
    pub flat: bool,
}

impl Thresholds {
    /// Derive thresholds from per-frame energies.
    ///
    /// Percentiles index a sorted copy at `floor(fraction * n)`. An empty
    /// slice gives all-zero thresholds and counts as flat.
    pub fn from_energies(energies: &[f64]) -> Self {
        let mut sorted = energies.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self {
            silence: percentile(&sorted, 0.25),
            low: percentile(&sorted, 0.5),
            medium: percentile(&sorted, 0.75),
            flat: sorted.first() == sorted.last(),
        }
    }

    /// True when the energy distribution is a single value (silent or
    /// constant audio). Coinciding cut points alone do not qualify: a flat
    /// background with a short burst still has a louder frame.
    pub fn is_collapsed(&self) -> bool {
        self.flat
    }
}

fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64 * fraction).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}
