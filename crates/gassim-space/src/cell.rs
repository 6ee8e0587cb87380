//! The [`Cell`] node type.

use gassim_core::{CellId, CellIndex, GroupId};
use smallvec::SmallVec;

/// A node in the cell graph.
///
/// Holds its immutable id, an ordered list of neighbour indices, and a
/// non-owning reference to the group that currently owns it. Groups are
/// the sole owners of membership; a cell only records which one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    neighbours: SmallVec<[CellIndex; 4]>,
    group: Option<GroupId>,
}

impl Cell {
    /// A groupless cell with no neighbours.
    pub fn new(id: CellId) -> Self {
        Self {
            id,
            neighbours: SmallVec::new(),
            group: None,
        }
    }

    /// The cell's unique id.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Neighbour indices in the order the edges were added.
    pub fn neighbours(&self) -> &[CellIndex] {
        &self.neighbours
    }

    /// The owning group, if any.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Whether the cell currently belongs to a group.
    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }

    /// Record `group` as the owner.
    ///
    /// Only the owning group's membership logic should call this; it does
    /// not touch any group's cell set.
    pub fn assign_group(&mut self, group: GroupId) {
        debug_assert!(
            self.group.is_none() || self.group == Some(group),
            "cell {} already owned by group {:?}",
            self.id,
            self.group
        );
        self.group = Some(group);
    }

    pub(crate) fn push_neighbour(&mut self, other: CellIndex) {
        self.neighbours.push(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_groupless() {
        let c = Cell::new(CellId(1));
        assert_eq!(c.id(), CellId(1));
        assert!(c.neighbours().is_empty());
        assert!(!c.is_grouped());
    }

    #[test]
    fn assign_sets_owner() {
        let mut c = Cell::new(CellId(1));
        c.assign_group(GroupId(4));
        assert_eq!(c.group(), Some(GroupId(4)));
        // Reassigning the same owner is harmless.
        c.assign_group(GroupId(4));
        assert_eq!(c.group(), Some(GroupId(4)));
    }
}
