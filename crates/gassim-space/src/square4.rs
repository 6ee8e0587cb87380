//! Rectangular grid world with 4-connected neighbourhood (N/S/E/W).

use gassim_core::{CellIndex, UniqueCellId};

use crate::edge::EdgeBehavior;
use crate::error::SpaceError;
use crate::graph::CellGraph;

/// Builder and address book for a `rows x cols` grid of cells.
///
/// Cells are created in row-major order, so the cell at `(row, col)` sits
/// at `CellIndex(row * cols + col)`. Each cell is linked to its left and
/// upper neighbour as it is created, and those neighbours link back, which
/// gives every cell the neighbour order `[left, up, right, down]` (minus
/// the ones missing at the border). Wrap seams are appended after those.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square4Grid {
    rows: u32,
    cols: u32,
    edge: EdgeBehavior,
}

impl Square4Grid {
    /// Largest total cell count: one index value is kept free.
    pub const MAX_CELLS: u64 = u32::MAX as u64;

    /// Describe a grid. Nothing is allocated until [`build`](Self::build).
    pub fn new(rows: u32, cols: u32, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if (rows as u64) * (cols as u64) > Self::MAX_CELLS {
            return Err(SpaceError::DimensionTooLarge {
                name: "rows * cols",
                value: rows.saturating_mul(cols),
                max: u32::MAX,
            });
        }
        Ok(Self { rows, cols, edge })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Edge behaviour.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.edge
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Index of the cell at `(row, col)`, or `None` out of bounds.
    pub fn index(&self, row: u32, col: u32) -> Option<CellIndex> {
        if row < self.rows && col < self.cols {
            Some(CellIndex(row * self.cols + col))
        } else {
            None
        }
    }

    /// `(row, col)` of a cell index, or `None` out of bounds.
    pub fn coord(&self, index: CellIndex) -> Option<(u32, u32)> {
        if index.index() < self.cell_count() {
            Some((index.0 / self.cols, index.0 % self.cols))
        } else {
            None
        }
    }

    /// Create and link every cell, drawing ids from `ids`.
    ///
    /// With a fresh generator the ids run `1..=rows*cols` in row-major order.
    pub fn build(&self, ids: &UniqueCellId) -> CellGraph {
        let mut graph = CellGraph::with_capacity(self.cell_count());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let mut links = Vec::with_capacity(2);
                if col > 0 {
                    links.push(CellIndex(row * self.cols + col - 1));
                }
                if row > 0 {
                    links.push(CellIndex((row - 1) * self.cols + col));
                }
                // Generator ids never repeat and links point at earlier cells.
                graph
                    .insert(ids.next(), &links)
                    .expect("grid cell insertion validated");
            }
        }
        if self.edge == EdgeBehavior::Wrap {
            self.link_wrap(&mut graph);
        }
        graph
    }

    /// Close the torus. Axes of length 1 or 2 already have every
    /// neighbour they can get, so they are left alone.
    fn link_wrap(&self, graph: &mut CellGraph) {
        let mut seams = Vec::new();
        if self.cols > 2 {
            for row in 0..self.rows {
                seams.push((row * self.cols + self.cols - 1, row * self.cols));
            }
        }
        if self.rows > 2 {
            for col in 0..self.cols {
                seams.push(((self.rows - 1) * self.cols + col, col));
            }
        }
        for (a, b) in seams {
            graph
                .link(CellIndex(a), CellIndex(b))
                .expect("wrap seam endpoints validated");
        }
    }
}
