//! Test utilities for gassim development.
//!
//! Provides grid-world builders, the standard fluids used across the test
//! suites, [`assert_invariants`] for membership and fringe consistency,
//! and budget-consuming [`fixtures`] phases for tick-composition tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use gassim_core::{CellIndex, Fluid, GroupId, UniqueCellId};
use gassim_engine::{Simulation, SimulationConfig};
use gassim_space::{EdgeBehavior, Square4Grid};

/// Oxygen at 101.6 kPa and 290 K.
pub fn oxygen() -> Fluid {
    Fluid::new("Oxygen", "Oxygen", 101.6, 290.0).expect("oxygen fixture is valid")
}

/// Hydrogen at 101.6 kPa and 290 K.
pub fn hydrogen() -> Fluid {
    Fluid::new("Hydrogen", "Hydrogen", 101.6, 290.0).expect("hydrogen fixture is valid")
}

/// A simulation over a square grid, with the grid kept for coordinate lookups.
pub struct GridWorld {
    pub grid: Square4Grid,
    pub sim: Simulation,
}

impl GridWorld {
    /// Build an empty simulation over a `rows` x `cols` grid.
    pub fn new(rows: u32, cols: u32, config: SimulationConfig) -> Self {
        Self::with_edges(rows, cols, EdgeBehavior::Absorb, config)
    }

    /// Like [`GridWorld::new`] with an explicit edge behaviour.
    pub fn with_edges(rows: u32, cols: u32, edge: EdgeBehavior, config: SimulationConfig) -> Self {
        let grid = Square4Grid::new(rows, cols, edge).expect("test grid dimensions are valid");
        let sim = Simulation::new(grid.build(&UniqueCellId::new()), config)
            .expect("test config is valid");
        Self { grid, sim }
    }

    /// Cell index at `(row, col)`. Panics outside the grid.
    pub fn at(&self, row: u32, col: u32) -> CellIndex {
        self.grid
            .index(row, col)
            .unwrap_or_else(|| panic!("({row}, {col}) outside {}x{}", self.grid.rows(), self.grid.cols()))
    }

    /// Create a simulated group seeded at `(row, col)` holding `fluid`.
    pub fn seed(&mut self, row: u32, col: u32, fluid: Fluid) -> GroupId {
        let cell = self.at(row, col);
        let group = self.sim.create_group(true);
        self.sim.add_cell(group, cell).expect("seed cell exists");
        self.sim.add_fluid(group, fluid).expect("seed group exists");
        group
    }

    /// Manhattan distance from `(row, col)` to `cell`.
    pub fn distance(&self, row: u32, col: u32, cell: CellIndex) -> u32 {
        let (r, c) = self.grid.coord(cell).expect("cell inside grid");
        r.abs_diff(row) + c.abs_diff(col)
    }
}

/// The two-corner world: a 10x10 grid, oxygen seeded at the top-left,
/// hydrogen at the bottom-right, groups capped at 30 cells and ticks
/// budgeted at 10 steps.
///
/// Returns the world and the two group ids `(oxygen, hydrogen)`.
pub fn two_corner_world() -> (GridWorld, GroupId, GroupId) {
    let config = SimulationConfig {
        max_group_size: 30,
        max_steps_to_simulate: 10,
    };
    let mut world = GridWorld::new(10, 10, config);
    let o2 = world.seed(0, 0, oxygen());
    let h2 = world.seed(9, 9, hydrogen());
    (world, o2, h2)
}

/// Assert that cell membership and fringes are consistent across the
/// whole simulation.
///
/// Checks that every member cell points back at its group, every grouped
/// cell is a member of the group it points at, and every fringe cell is
/// groupless and not a member of the group that queued it.
pub fn assert_invariants(sim: &Simulation) {
    let graph = sim.graph();
    for group in sim.groups() {
        for &cell in group.cells() {
            let owner = graph.get(cell).and_then(|c| c.group());
            assert_eq!(
                owner,
                Some(group.id()),
                "cell {cell} is in group {} but points at {owner:?}",
                group.id()
            );
        }
        for cell in group.fringe().iter() {
            assert!(
                !group.contains(cell),
                "cell {cell} is both member and fringe of group {}",
                group.id()
            );
            let c = graph.get(cell).expect("fringe cell exists");
            assert!(
                !c.is_grouped(),
                "fringe cell {cell} of group {} is owned by {:?}",
                group.id(),
                c.group()
            );
        }
    }
    let mut members = 0;
    for (index, cell) in graph.iter() {
        if let Some(owner) = cell.group() {
            let group = sim
                .group(owner)
                .unwrap_or_else(|| panic!("cell {index} points at missing group {owner}"));
            assert!(group.contains(index), "group {owner} does not list cell {index}");
            members += 1;
        }
    }
    let listed: usize = sim.groups().iter().map(|g| g.len()).sum();
    assert_eq!(listed, members, "group member counts disagree with the graph");
}
