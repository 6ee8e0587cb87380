//! gassim: budgeted flood-fill gas diffusion over cell graphs.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all gassim sub-crates, plus a plain-text [`render`] of grid worlds.
//!
//! # Quick start
//!
//! ```rust
//! use gassim::prelude::*;
//!
//! let grid = Square4Grid::new(10, 10, EdgeBehavior::Absorb).unwrap();
//! let graph = grid.build(&UniqueCellId::new());
//! let config = SimulationConfig {
//!     max_group_size: 30,
//!     max_steps_to_simulate: 10,
//! };
//! let mut sim = Simulation::new(graph, config).unwrap();
//!
//! let oxygen = sim.create_group(true);
//! sim.add_cell(oxygen, grid.index(0, 0).unwrap()).unwrap();
//! sim.add_fluid(oxygen, Fluid::new("Oxygen", "Oxygen", 101.6, 290.0).unwrap())
//!     .unwrap();
//!
//! sim.simulate();
//! assert_eq!(sim.group(oxygen).unwrap().len(), 11);
//!
//! let legend = GlyphLegend::new().with("Oxygen", 'O');
//! let picture = gassim::render::render_grid(&sim, &grid, &legend);
//! assert!(picture.starts_with("OOOO"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gassim-core` | IDs, fluids and mixtures, error types |
//! | [`space`] | `gassim-space` | Cell graph arena and grid construction |
//! | [`engine`] | `gassim-engine` | Groups, phases and the simulation |
//! | [`render`] | this crate | ASCII rendering of grid worlds |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod render;

/// Core types and IDs (`gassim-core`).
///
/// Contains [`types::Fluid`], [`types::FluidMixture`] with the mixing
/// rule, and the [`types::UniqueCellId`] generator.
pub use gassim_core as types;

/// Cell graph storage and world construction (`gassim-space`).
///
/// [`space::CellGraph`] for hand-built worlds, [`space::Square4Grid`] for
/// rectangular ones.
pub use gassim_space as space;

/// Groups, phases and the tick loop (`gassim-engine`).
///
/// [`engine::Simulation`] is the entry point; [`engine::Phase`] is the
/// extension point for transfer and split policies.
pub use gassim_engine as engine;

/// Common imports for typical gassim usage.
///
/// ```rust
/// use gassim::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gassim_core::{
        CellId, CellIndex, Fluid, FluidMixture, GroupId, MixOutcome, TickId, UniqueCellId,
    };

    // Errors
    pub use gassim_core::{FluidError, GroupError};
    pub use gassim_engine::ConfigError;
    pub use gassim_space::SpaceError;

    // Space
    pub use gassim_space::{CellGraph, EdgeBehavior, Square4Grid};

    // Engine
    pub use gassim_engine::{
        CellGroup, GroupHandle, GroupState, Phase, PhaseContext, Simulation, SimulationConfig,
        TickMetrics,
    };

    // Rendering
    pub use crate::render::GlyphLegend;
}
