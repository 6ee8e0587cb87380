//! Strongly-typed identifiers and the [`UniqueCellId`] generator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable, externally visible identity of a cell.
///
/// Assigned once at world construction by [`UniqueCellId`] and never
/// changed afterwards. Distinct from [`CellIndex`], which is the cell's
/// slot in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CellId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Position of a cell inside a `CellGraph` arena.
///
/// Neighbour lists and group membership sets store these rather than
/// references, so the graph can be mutated without aliasing concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(pub u32);

impl CellIndex {
    /// The index as a `usize`, for slice addressing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for CellIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a cell group within a simulation.
///
/// Groups are never removed, so `GroupId(n)` is the n-th group created
/// and doubles as its position in the simulation's group list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl GroupId {
    /// The id as a `usize`, for slice addressing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the simulation runs one `simulate` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Generator of unique, strictly increasing [`CellId`]s.
///
/// The counter starts at zero and is pre-incremented, so the first call
/// to [`next`](Self::next) returns `CellId(1)`. Thread-safe: a single
/// generator may be shared by reference between world builders.
///
/// Uniqueness is scoped to one generator, not to the process: two
/// generators each start at 1. Worlds whose ids must never collide have
/// to draw from the same instance.
///
/// # Examples
///
/// ```
/// use gassim_core::{CellId, UniqueCellId};
///
/// let ids = UniqueCellId::new();
/// assert_eq!(ids.next(), CellId(1));
/// assert_eq!(ids.next(), CellId(2));
/// ```
#[derive(Debug, Default)]
pub struct UniqueCellId {
    counter: AtomicU64,
}

impl UniqueCellId {
    /// Create a generator whose first id is 1.
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Allocate the next id.
    pub fn next(&self) -> CellId {
        CellId(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// The most recently issued id, or `None` before the first call.
    pub fn last(&self) -> Option<CellId> {
        match self.counter.load(Ordering::Relaxed) {
            0 => None,
            n => Some(CellId(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_id_is_one() {
        let ids = UniqueCellId::new();
        assert_eq!(ids.last(), None);
        assert_eq!(ids.next(), CellId(1));
        assert_eq!(ids.last(), Some(CellId(1)));
    }

    #[test]
    fn generators_are_independent() {
        let a = UniqueCellId::new();
        let b = UniqueCellId::default();
        a.next();
        a.next();
        assert_eq!(b.next(), CellId(1));
        assert_eq!(a.next(), CellId(3));
    }

    #[test]
    fn shared_generator_is_unique_across_threads() {
        let ids = UniqueCellId::new();
        let mut drawn: Vec<CellId> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| (0..250).map(|_| ids.next()).collect::<Vec<_>>()))
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });
        drawn.sort();
        drawn.dedup();
        assert_eq!(drawn.len(), 1000);
        assert_eq!(ids.last(), Some(CellId(1000)));
    }

    #[test]
    fn display_forms() {
        assert_eq!(CellId(7).to_string(), "7");
        assert_eq!(CellIndex(7).to_string(), "#7");
        assert_eq!(GroupId(3).to_string(), "3");
        assert_eq!(TickId(9).to_string(), "9");
    }

    proptest! {
        #[test]
        fn ids_increase_by_one(n in 1usize..500) {
            let ids = UniqueCellId::new();
            let drawn: Vec<CellId> = (0..n).map(|_| ids.next()).collect();
            for (i, id) in drawn.iter().enumerate() {
                prop_assert_eq!(id.0, i as u64 + 1);
            }
        }
    }
}
