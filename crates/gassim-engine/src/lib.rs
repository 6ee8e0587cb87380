//! Group expansion engine for gassim.
//!
//! Provides the [`Simulation`] that owns every [`CellGroup`] and spends a
//! per-tick step budget on breadth-first expansion, inter-group transfer
//! and group splitting. Transfer and split are [`Phase`] implementations
//! so new policies can be installed without touching expansion.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod group;
pub mod metrics;
pub mod phase;
pub mod simulation;

pub use config::{ConfigError, SimulationConfig};
pub use group::{CellGroup, Fringe, GroupHandle, GroupState};
pub use metrics::TickMetrics;
pub use phase::{PassThroughPhase, Phase, PhaseContext};
pub use simulation::Simulation;
