//! Plain-text pictures of grid worlds.
//!
//! Each cell is drawn as one character per [`GlyphLegend`] entry: the
//! entry's glyph if the owning group holds that fluid, `_` if it does not.
//! Ungrouped cells, and grouped cells holding none of the legend fluids,
//! are drawn as dots. With an oxygen/hydrogen legend that gives `O_`, `_H`,
//! `OH` and `..`.
//!
//! Rendering only reads the simulation.

use gassim_core::CellIndex;
use gassim_engine::Simulation;
use gassim_space::Square4Grid;

/// Glyph drawn for an absent legend fluid in a cell that shows others.
pub const ABSENT: char = '_';
/// Glyph drawn for ungrouped cells and cells showing no legend fluid.
pub const EMPTY: char = '.';

/// Ordered mapping from fluid id to display character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphLegend {
    entries: Vec<(String, char)>,
}

impl GlyphLegend {
    /// An empty legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Later entries are drawn to the right.
    pub fn with(mut self, fluid_id: impl Into<String>, glyph: char) -> Self {
        self.entries.push((fluid_id.into(), glyph));
        self
    }

    /// Characters drawn per cell.
    pub fn width(&self) -> usize {
        self.entries.len()
    }
}

/// The glyphs for a single cell.
pub fn cell_glyphs(sim: &Simulation, cell: CellIndex, legend: &GlyphLegend) -> String {
    let blank = || EMPTY.to_string().repeat(legend.width());
    let Some(group) = sim.group_of(cell) else {
        return blank();
    };
    let fluids = group.fluids();
    if !legend.entries.iter().any(|(id, _)| fluids.contains(id)) {
        return blank();
    }
    legend
        .entries
        .iter()
        .map(|(id, glyph)| if fluids.contains(id) { *glyph } else { ABSENT })
        .collect()
}

/// Draw the whole grid, one line per row, top row first.
pub fn render_grid(sim: &Simulation, grid: &Square4Grid, legend: &GlyphLegend) -> String {
    let mut out = String::with_capacity(grid.cell_count() * legend.width() + grid.rows() as usize);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if let Some(cell) = grid.index(row, col) {
                out.push_str(&cell_glyphs(sim, cell, legend));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gassim_core::{Fluid, UniqueCellId};
    use gassim_engine::SimulationConfig;
    use gassim_space::EdgeBehavior;

    fn legend() -> GlyphLegend {
        GlyphLegend::new().with("Oxygen", 'O').with("Hydrogen", 'H')
    }

    fn gas(id: &str) -> Fluid {
        Fluid::new(id, id, 101.6, 290.0).unwrap()
    }

    #[test]
    fn glyph_policy_covers_every_combination() {
        let grid = Square4Grid::new(1, 5, EdgeBehavior::Absorb).unwrap();
        let mut sim =
            Simulation::new(grid.build(&UniqueCellId::new()), SimulationConfig::default()).unwrap();
        let fills: [&[&str]; 4] = [&["Oxygen"], &["Hydrogen"], &["Oxygen", "Hydrogen"], &["Argon"]];
        for (col, fluids) in fills.iter().enumerate() {
            let g = sim.create_group(false);
            sim.add_cell(g, grid.index(0, col as u32).unwrap()).unwrap();
            for id in *fluids {
                sim.add_fluid(g, gas(id)).unwrap();
            }
        }
        assert_eq!(render_grid(&sim, &grid, &legend()), "O__HOH....\n");
    }

    #[test]
    fn empty_legend_draws_nothing_per_cell() {
        let grid = Square4Grid::new(2, 2, EdgeBehavior::Absorb).unwrap();
        let sim =
            Simulation::new(grid.build(&UniqueCellId::new()), SimulationConfig::default()).unwrap();
        assert_eq!(render_grid(&sim, &grid, &GlyphLegend::new()), "\n\n");
    }
}
