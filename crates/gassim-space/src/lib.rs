//! Cell graph storage and world construction for gassim.
//!
//! Cells live in a flat [`CellGraph`] arena and refer to each other by
//! [`CellIndex`](gassim_core::CellIndex). Neighbour edges are symmetric and
//! fixed once the world is built; only a cell's owning-group reference
//! changes while a simulation runs.
//!
//! # Backends
//!
//! - [`Square4Grid`]: rectangular grid with 4-connected neighbourhood and
//!   configurable [`EdgeBehavior`] (absorb or wrap)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod edge;
pub mod error;
pub mod graph;
pub mod square4;

#[cfg(test)]
pub(crate) mod compliance;

pub use cell::Cell;
pub use edge::EdgeBehavior;
pub use error::SpaceError;
pub use graph::CellGraph;
pub use square4::Square4Grid;
