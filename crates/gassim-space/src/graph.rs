//! The [`CellGraph`] arena.

use gassim_core::{CellId, CellIndex};
use indexmap::IndexMap;

use crate::cell::Cell;
use crate::error::SpaceError;

/// Flat, index-addressed store of every cell in a world.
///
/// Cells are appended once and never removed, so a [`CellIndex`] stays
/// valid for the graph's lifetime. Edges added through [`link`](Self::link)
/// are always symmetric.
#[derive(Clone, Debug, Default)]
pub struct CellGraph {
    cells: Vec<Cell>,
    by_id: IndexMap<CellId, CellIndex>,
}

impl CellGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty graph with room for `capacity` cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            by_id: IndexMap::with_capacity(capacity),
        }
    }

    /// Append a groupless cell and link it to `neighbours`.
    ///
    /// Each neighbour gains a back-edge to the new cell. Fails without
    /// inserting anything if the id is taken or a neighbour is unknown.
    pub fn insert(&mut self, id: CellId, neighbours: &[CellIndex]) -> Result<CellIndex, SpaceError> {
        if self.by_id.contains_key(&id) {
            return Err(SpaceError::DuplicateCellId { id });
        }
        for &n in neighbours {
            self.check(n)?;
        }
        let raw = u32::try_from(self.cells.len()).map_err(|_| SpaceError::DimensionTooLarge {
            name: "cell count",
            value: u32::MAX,
            max: u32::MAX - 1,
        })?;
        let index = CellIndex(raw);
        self.cells.push(Cell::new(id));
        self.by_id.insert(id, index);
        for &n in neighbours {
            self.link(index, n)?;
        }
        Ok(index)
    }

    /// Add a symmetric edge between `a` and `b`.
    ///
    /// Returns `Ok(false)` if the edge already existed.
    pub fn link(&mut self, a: CellIndex, b: CellIndex) -> Result<bool, SpaceError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(SpaceError::SelfLoop { cell: a });
        }
        if self.cells[a.index()].neighbours().contains(&b) {
            return Ok(false);
        }
        self.cells[a.index()].push_neighbour(b);
        self.cells[b.index()].push_neighbour(a);
        Ok(true)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the graph holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `index` addresses a cell in this graph.
    pub fn contains(&self, index: CellIndex) -> bool {
        index.index() < self.cells.len()
    }

    /// Borrow a cell.
    pub fn get(&self, index: CellIndex) -> Option<&Cell> {
        self.cells.get(index.index())
    }

    /// Mutably borrow a cell.
    pub fn get_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        self.cells.get_mut(index.index())
    }

    /// Neighbours of `index`; empty for an unknown index.
    pub fn neighbours(&self, index: CellIndex) -> &[CellIndex] {
        self.get(index).map(Cell::neighbours).unwrap_or(&[])
    }

    /// Resolve a cell id to its index.
    pub fn index_of(&self, id: CellId) -> Option<CellIndex> {
        self.by_id.get(&id).copied()
    }

    /// All `(index, cell)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (CellIndex(i as u32), c))
    }

    /// Number of cells currently owned by some group.
    pub fn grouped_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_grouped()).count()
    }

    /// Fail with [`SpaceError::UnknownCell`] if `index` is out of range.
    pub fn check(&self, index: CellIndex) -> Result<(), SpaceError> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(SpaceError::UnknownCell {
                cell: index,
                cell_count: self.cells.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;

    fn line(n: u64) -> CellGraph {
        let mut g = CellGraph::new();
        let mut prev: Option<CellIndex> = None;
        for id in 1..=n {
            let nb: Vec<CellIndex> = prev.into_iter().collect();
            prev = Some(g.insert(CellId(id), &nb).unwrap());
        }
        g
    }

    #[test]
    fn insert_links_both_ways() {
        let g = line(3);
        assert_eq!(g.len(), 3);
        assert_eq!(g.neighbours(CellIndex(0)), &[CellIndex(1)]);
        assert_eq!(g.neighbours(CellIndex(1)), &[CellIndex(0), CellIndex(2)]);
        compliance::run_full_compliance(&g);
    }

    #[test]
    fn link_ignores_duplicates() {
        let mut g = line(2);
        assert!(!g.link(CellIndex(1), CellIndex(0)).unwrap());
        assert_eq!(g.neighbours(CellIndex(0)).len(), 1);
    }

    #[test]
    fn link_rejects_self_and_unknown() {
        let mut g = line(2);
        assert_eq!(
            g.link(CellIndex(0), CellIndex(0)),
            Err(SpaceError::SelfLoop { cell: CellIndex(0) })
        );
        assert_eq!(
            g.link(CellIndex(0), CellIndex(9)),
            Err(SpaceError::UnknownCell {
                cell: CellIndex(9),
                cell_count: 2
            })
        );
    }

    #[test]
    fn insert_rejects_duplicate_id_without_side_effects() {
        let mut g = line(2);
        let err = g.insert(CellId(2), &[CellIndex(0)]).unwrap_err();
        assert_eq!(err, SpaceError::DuplicateCellId { id: CellId(2) });
        assert_eq!(g.len(), 2);
        assert_eq!(g.neighbours(CellIndex(0)).len(), 1);
    }

    #[test]
    fn lookup_by_id() {
        let g = line(4);
        assert_eq!(g.index_of(CellId(3)), Some(CellIndex(2)));
        assert_eq!(g.index_of(CellId(42)), None);
        assert_eq!(g.get(CellIndex(2)).map(Cell::id), Some(CellId(3)));
        assert!(g.neighbours(CellIndex(99)).is_empty());
    }

    #[test]
    fn grouped_count_tracks_assignment() {
        let mut g = line(3);
        assert_eq!(g.grouped_count(), 0);
        g.get_mut(CellIndex(1))
            .unwrap()
            .assign_group(gassim_core::GroupId(0));
        assert_eq!(g.grouped_count(), 1);
    }
}
