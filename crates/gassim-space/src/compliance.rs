//! Cell graph compliance checks.
//!
//! These verify the structural invariants every graph must satisfy
//! regardless of how it was built. Reused by the graph and grid tests.

use crate::graph::CellGraph;
use indexmap::IndexSet;

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(graph: &CellGraph) {
    for (index, cell) in graph.iter() {
        for &nb in cell.neighbours() {
            assert!(
                graph.neighbours(nb).contains(&index),
                "{nb} is a neighbour of {index} but not vice versa"
            );
        }
    }
}

/// Assert no cell lists itself or the same neighbour twice.
pub fn assert_neighbours_simple(graph: &CellGraph) {
    for (index, cell) in graph.iter() {
        let unique: IndexSet<_> = cell.neighbours().iter().copied().collect();
        assert_eq!(
            unique.len(),
            cell.neighbours().len(),
            "{index} has duplicate neighbours: {:?}",
            cell.neighbours()
        );
        assert!(!unique.contains(&index), "{index} neighbours itself");
    }
}

/// Assert that cell ids are unique and resolve back to their index.
pub fn assert_ids_resolve(graph: &CellGraph) {
    for (index, cell) in graph.iter() {
        assert_eq!(graph.index_of(cell.id()), Some(index));
    }
}

/// Run every check above.
pub fn run_full_compliance(graph: &CellGraph) {
    assert_neighbours_symmetric(graph);
    assert_neighbours_simple(graph);
    assert_ids_resolve(graph);
}
