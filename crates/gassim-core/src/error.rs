//! Error types for fluid construction and group operations.
//!
//! Invariant violations (a cell owned by two groups, a grouped cell left in
//! a fringe) are programming defects and are caught by debug assertions,
//! not reported through these enums.

use std::error::Error;
use std::fmt;

use crate::id::{CellIndex, GroupId};

/// Errors from constructing a [`Fluid`](crate::Fluid).
#[derive(Clone, Debug, PartialEq)]
pub enum FluidError {
    /// Pressure is negative, NaN, or infinite.
    InvalidPressure {
        /// Identifier of the offending fluid.
        id: String,
        /// The rejected value.
        value: f64,
    },
    /// Temperature is NaN or infinite.
    InvalidTemperature {
        /// Identifier of the offending fluid.
        id: String,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for FluidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPressure { id, value } => {
                write!(f, "fluid '{id}': pressure must be finite and >= 0, got {value}")
            }
            Self::InvalidTemperature { id, value } => {
                write!(f, "fluid '{id}': temperature must be finite, got {value}")
            }
        }
    }
}

impl Error for FluidError {}

/// Invalid-argument errors from group and cell operations.
///
/// Raised before any state is touched, so a failed call never leaves a
/// partially initialised group behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupError {
    /// A cell index does not exist in the cell universe.
    UnknownCell {
        /// The offending index.
        cell: CellIndex,
        /// Number of cells in the universe.
        cell_count: usize,
    },
    /// A group id does not exist in the simulation.
    UnknownGroup {
        /// The offending id.
        group: GroupId,
        /// Number of groups in the simulation.
        group_count: usize,
    },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCell { cell, cell_count } => {
                write!(f, "cell {cell} out of range: universe has {cell_count} cells")
            }
            Self::UnknownGroup { group, group_count } => {
                write!(
                    f,
                    "group {group} out of range: simulation has {group_count} groups"
                )
            }
        }
    }
}

impl Error for GroupError {}
