//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] carries the two tunables of the expansion
//! algorithm. [`validate()`](SimulationConfig::validate) runs when a
//! [`Simulation`](crate::Simulation) is built and whenever a limit is
//! changed afterwards.

use std::error::Error;
use std::fmt;

use gassim_core::{CellIndex, GroupId};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimulationConfig::validate()`] or while
/// building a [`Simulation`](crate::Simulation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_group_size` is zero; every group would be capped before it
    /// held a single cell.
    ZeroGroupSize,
    /// The cell graph handed to a new simulation already has an owned
    /// cell. Ownership can only be granted by the simulation's own groups.
    GroupedCell {
        /// The first owned cell found.
        cell: CellIndex,
        /// The group it points at.
        group: GroupId,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroGroupSize => write!(f, "max_group_size must be at least 1"),
            Self::GroupedCell { cell, group } => write!(
                f,
                "cell {cell} already belongs to group {group}; a new simulation needs a groupless graph"
            ),
        }
    }
}

impl Error for ConfigError {}

// ── SimulationConfig ───────────────────────────────────────────────

/// Tunables for expansion and tick budgeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Cell count at which a growing group stops expanding and sheds its
    /// fringe as new seed groups. Default: 32.
    pub max_group_size: u32,
    /// Step budget used by [`Simulation::simulate`](crate::Simulation::simulate).
    /// Default: 30.
    pub max_steps_to_simulate: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_group_size: 32,
            max_steps_to_simulate: 30,
        }
    }
}

impl SimulationConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_group_size == 0 {
            return Err(ConfigError::ZeroGroupSize);
        }
        Ok(())
    }
}
