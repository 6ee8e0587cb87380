//! Error types for graph and grid construction.

use gassim_core::{CellId, CellIndex};
use std::fmt;

/// Errors arising from building or linking a cell graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A grid dimension exceeds what a [`CellIndex`] can address.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// A cell index is not present in the graph.
    UnknownCell {
        /// The offending index.
        cell: CellIndex,
        /// Number of cells in the graph.
        cell_count: usize,
    },
    /// Tried to link a cell to itself.
    SelfLoop {
        /// The cell in question.
        cell: CellIndex,
    },
    /// A cell with this id is already in the graph.
    DuplicateCellId {
        /// The repeated id.
        id: CellId,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "space must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum of {max}")
            }
            Self::UnknownCell { cell, cell_count } => {
                write!(f, "cell {cell} out of range: graph has {cell_count} cells")
            }
            Self::SelfLoop { cell } => write!(f, "cell {cell} cannot neighbour itself"),
            Self::DuplicateCellId { id } => write!(f, "cell id {id} already present"),
        }
    }
}

impl std::error::Error for SpaceError {}
