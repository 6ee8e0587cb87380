//! Per-tick metrics for the simulation.
//!
//! [`TickMetrics`] records how a tick spent its budget, enabling
//! telemetry and tuning of `max_steps_to_simulate`.

use gassim_core::TickId;

/// Budget accounting and timing for a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// The tick these metrics describe.
    pub tick: TickId,
    /// Budget the tick was given.
    pub budget: u32,
    /// Steps consumed across every phase and pass.
    pub consumed: u32,
    /// Steps consumed per phase, both passes summed: `(name, steps)`.
    pub phase_steps: Vec<(String, u32)>,
    /// Cells that moved from groupless to grouped by expansion.
    pub cells_absorbed: u32,
    /// Groups spawned by split-on-overflow.
    pub groups_spawned: u32,
    /// Wall-clock time for the tick, in microseconds.
    pub total_us: u64,
}

impl TickMetrics {
    /// Steps consumed by the named phase, or 0 if it did not run.
    pub fn steps_for(&self, phase: &str) -> u32 {
        self.phase_steps
            .iter()
            .find(|(name, _)| name == phase)
            .map_or(0, |(_, steps)| *steps)
    }

    /// Budget left over at the end of the tick.
    pub fn remaining(&self) -> u32 {
        self.budget - self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TickMetrics::default();
        assert_eq!(m.tick, TickId(0));
        assert_eq!(m.budget, 0);
        assert_eq!(m.consumed, 0);
        assert!(m.phase_steps.is_empty());
        assert_eq!(m.cells_absorbed, 0);
        assert_eq!(m.groups_spawned, 0);
        assert_eq!(m.total_us, 0);
    }

    #[test]
    fn steps_lookup_by_name() {
        let m = TickMetrics {
            budget: 10,
            consumed: 7,
            phase_steps: vec![("expand".to_string(), 5), ("transfer".to_string(), 2)],
            ..Default::default()
        };
        assert_eq!(m.steps_for("expand"), 5);
        assert_eq!(m.steps_for("transfer"), 2);
        assert_eq!(m.steps_for("split"), 0);
        assert_eq!(m.remaining(), 3);
    }
}
