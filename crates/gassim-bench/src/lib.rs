//! Benchmark profiles for the gassim group-diffusion model.
//!
//! - [`reference_profile`]: 100x100 grid (10K cells) seeded at two corners
//! - [`stress_profile`]: 316x316 grid (~100K cells) seeded at four corners

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gassim_core::{Fluid, UniqueCellId};
use gassim_engine::{Simulation, SimulationConfig};
use gassim_space::{EdgeBehavior, Square4Grid};

/// Build a `side x side` simulation with one seeded group per listed corner.
///
/// Each corner `(row, col)` gets its own fluid named `gas{i}`.
pub fn corner_world(side: u32, corners: &[(u32, u32)], config: SimulationConfig) -> Simulation {
    let grid = Square4Grid::new(side, side, EdgeBehavior::Absorb).unwrap();
    let mut sim = Simulation::new(grid.build(&UniqueCellId::new()), config).unwrap();
    for (i, &(row, col)) in corners.iter().enumerate() {
        let cell = grid.index(row, col).unwrap();
        let group = sim.create_group(true);
        sim.add_cell(group, cell).unwrap();
        let id = format!("gas{i}");
        sim.add_fluid(group, Fluid::new(id.clone(), id, 101.6, 290.0).unwrap())
            .unwrap();
    }
    sim
}

/// Reference profile: 100x100 grid, two opposite corners, groups capped
/// at 64 cells, 300 steps per tick.
pub fn reference_profile() -> Simulation {
    corner_world(
        100,
        &[(0, 0), (99, 99)],
        SimulationConfig {
            max_group_size: 64,
            max_steps_to_simulate: 300,
        },
    )
}

/// Stress profile: 316x316 grid, four corners, groups capped at 256 cells,
/// 3000 steps per tick.
pub fn stress_profile() -> Simulation {
    corner_world(
        316,
        &[(0, 0), (0, 315), (315, 0), (315, 315)],
        SimulationConfig {
            max_group_size: 256,
            max_steps_to_simulate: 3000,
        },
    )
}
