//! Two gases spreading from opposite corners of a 10x10 grid.
//!
//! Demonstrates:
//!   1. Building a grid world and a simulation
//!   2. Seeding groups and adding fluids by group and by cell
//!   3. Stepping ticks and drawing the world between them
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example two_corners

use gassim::prelude::*;
use gassim::render::render_grid;

// ─── Grid parameters ────────────────────────────────────────────

const ROWS: u32 = 10;
const COLS: u32 = 10;
const TICKS: u32 = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let grid = Square4Grid::new(ROWS, COLS, EdgeBehavior::Absorb)?;
    let graph = grid.build(&UniqueCellId::new());
    let config = SimulationConfig {
        max_group_size: 30,
        max_steps_to_simulate: 10,
    };
    let mut sim = Simulation::new(graph, config)?;

    let top_left = grid.index(0, 0).ok_or("grid has no top-left cell")?;
    let bottom_right = grid
        .index(ROWS - 1, COLS - 1)
        .ok_or("grid has no bottom-right cell")?;

    let oxygen = sim.create_group(true);
    sim.add_cell(oxygen, top_left)?;
    sim.add_fluid(oxygen, Fluid::new("Oxygen", "Oxygen", 101.6, 290.0)?)?;

    let hydrogen = sim.create_group(true);
    sim.add_cell(hydrogen, bottom_right)?;
    sim.add_fluid_to_cell(bottom_right, Fluid::new("Hydrogen", "Hydrogen", 101.6, 290.0)?)?;

    let legend = GlyphLegend::new().with("Oxygen", 'O').with("Hydrogen", 'H');
    println!("{}", render_grid(&sim, &grid, &legend));

    for _ in 0..TICKS {
        if sim.stable() {
            break;
        }
        let metrics = sim.simulate();
        println!(
            "tick {}: {} of {} steps, {} cells absorbed, {} groups spawned, {}us",
            metrics.tick,
            metrics.consumed,
            metrics.budget,
            metrics.cells_absorbed,
            metrics.groups_spawned,
            metrics.total_us
        );
        println!("{}", render_grid(&sim, &grid, &legend));
    }

    println!(
        "{} groups, {} of {} cells grouped, stable = {}",
        sim.groups().len(),
        sim.graph().grouped_count(),
        sim.graph().len(),
        sim.stable()
    );
    Ok(())
}
