//! Reusable phase fixtures for tick-composition tests.
//!
//! - [`ConsumingPhase`]: spends a fixed number of steps per call.
//! - [`OverreportingPhase`]: claims to return more budget than it was given.
//! - [`TopUpPhase`]: adds a fluid to every simulated group, one step each.

use std::sync::{Arc, Mutex};

use gassim_core::{Fluid, GroupId};
use gassim_engine::{Phase, PhaseContext};

/// Spends up to `per_call` steps each time it runs.
///
/// Every call is recorded in a shared log so tests can inspect the budgets
/// the simulation offered after the phase has been boxed and installed.
pub struct ConsumingPhase {
    pub name: String,
    pub per_call: u32,
    offered: Arc<Mutex<Vec<u32>>>,
}

/// Read-only view of a [`ConsumingPhase`]'s call history.
#[derive(Clone)]
pub struct PhaseProbe {
    offered: Arc<Mutex<Vec<u32>>>,
}

impl PhaseProbe {
    /// How many times the phase has run.
    pub fn calls(&self) -> u32 {
        self.offered().len() as u32
    }

    /// Budgets offered to the phase, in call order.
    pub fn offered(&self) -> Vec<u32> {
        self.offered.lock().expect("probe lock poisoned").clone()
    }
}

impl ConsumingPhase {
    pub fn new(name: impl Into<String>, per_call: u32) -> Self {
        Self {
            name: name.into(),
            per_call,
            offered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handle that stays valid after the phase is moved into a simulation.
    pub fn probe(&self) -> PhaseProbe {
        PhaseProbe {
            offered: Arc::clone(&self.offered),
        }
    }
}

impl Phase for ConsumingPhase {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self, _ctx: &mut PhaseContext<'_>, budget: u32) -> u32 {
        self.offered.lock().expect("probe lock poisoned").push(budget);
        budget.saturating_sub(self.per_call)
    }
}

/// Returns `u32::MAX` regardless of the budget.
///
/// Used to check that the simulation clamps phase results.
pub struct OverreportingPhase;

impl Phase for OverreportingPhase {
    fn name(&self) -> &str {
        "overreporting"
    }

    fn run(&mut self, _ctx: &mut PhaseContext<'_>, _budget: u32) -> u32 {
        u32::MAX
    }
}

/// Adds a copy of `fluid` to each simulated group, in id order, at one
/// step per group until the budget runs out.
pub struct TopUpPhase {
    pub fluid: Fluid,
}

impl Phase for TopUpPhase {
    fn name(&self) -> &str {
        "top_up"
    }

    fn run(&mut self, ctx: &mut PhaseContext<'_>, budget: u32) -> u32 {
        let targets: Vec<GroupId> = ctx
            .groups()
            .iter()
            .filter(|g| g.simulate())
            .map(|g| g.id())
            .collect();
        let mut remaining = budget;
        for id in targets {
            if remaining == 0 {
                break;
            }
            if let Some(mut group) = ctx.group_mut(id) {
                group.add_fluid(self.fluid.clone());
                remaining -= 1;
            }
        }
        remaining
    }
}
