//! Edge (boundary) behaviour for grid backends.

/// How a grid links the cells on its border.
///
/// # Examples
///
/// ```
/// use gassim_core::UniqueCellId;
/// use gassim_space::{EdgeBehavior, Square4Grid};
///
/// // Absorb: corner has 2 neighbours, interior has 4.
/// let absorb = Square4Grid::new(4, 4, EdgeBehavior::Absorb).unwrap();
/// let graph = absorb.build(&UniqueCellId::new());
/// assert_eq!(graph.neighbours(absorb.index(0, 0).unwrap()).len(), 2);
/// assert_eq!(graph.neighbours(absorb.index(1, 1).unwrap()).len(), 4);
///
/// // Wrap: every cell has 4 neighbours (torus).
/// let wrap = Square4Grid::new(4, 4, EdgeBehavior::Wrap).unwrap();
/// let graph = wrap.build(&UniqueCellId::new());
/// assert_eq!(graph.neighbours(wrap.index(0, 0).unwrap()).len(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Border cells have fewer neighbours (corners 2, edges 3).
    #[default]
    Absorb,
    /// Opposite borders are linked (periodic boundary).
    Wrap,
}
