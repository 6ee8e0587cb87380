//! Cell groups: membership, fringe, fluid content and lifecycle state.
//!
//! A [`CellGroup`] owns a set of cells that share one [`FluidMixture`]. Its
//! [`Fringe`] is the breadth-first frontier of groupless neighbour cells
//! waiting to be absorbed. Membership only changes through the owning
//! [`Simulation`](crate::Simulation), which keeps every group's fringe free
//! of cells another group has claimed.

use std::collections::VecDeque;
use std::ops::Deref;

use gassim_core::{CellIndex, Fluid, FluidMixture, GroupId, MixOutcome};
use gassim_space::CellGraph;
use indexmap::IndexSet;

// ── GroupState ──────────────────────────────────────────────────

/// Lifecycle state of a group.
///
/// Replaces independent enabled/simulate/expand/stable switches so that
/// contradictory combinations cannot be expressed. The boolean views
/// ([`CellGroup::enabled`] and friends) are derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupState {
    /// Not simulated. Ignored by every phase until activated.
    Dormant,
    /// Simulated and absorbing its fringe.
    Growing,
    /// Reached the size cap; simulated but no longer expanding.
    Capped,
    /// Fringe exhausted without hitting the cap.
    Stable,
}

impl GroupState {
    /// Whether the group takes part in simulation at all.
    pub fn is_active(self) -> bool {
        self != Self::Dormant
    }
}

// ── Fringe ──────────────────────────────────────────────────────

/// FIFO frontier of candidate cells with set semantics.
///
/// Cells come out in the order they were first queued, which makes group
/// growth breadth-first from the seed cells. Removal of an arbitrary cell
/// is O(1): the entry is dropped from the member set and skipped when it
/// reaches the head of the queue.
#[derive(Clone, Debug, Default)]
pub struct Fringe {
    queue: VecDeque<CellIndex>,
    members: IndexSet<CellIndex>,
}

impl Fringe {
    /// Queue `cell` unless it is already present. Returns whether it was added.
    pub(crate) fn push(&mut self, cell: CellIndex) -> bool {
        if !self.members.insert(cell) {
            return false;
        }
        self.queue.push_back(cell);
        true
    }

    /// Take the earliest-queued live cell.
    pub(crate) fn pop(&mut self) -> Option<CellIndex> {
        while let Some(cell) = self.queue.pop_front() {
            if self.members.swap_remove(&cell) {
                return Some(cell);
            }
        }
        None
    }

    /// Drop `cell` from the fringe. Returns whether it was present.
    pub(crate) fn remove(&mut self, cell: CellIndex) -> bool {
        if !self.members.swap_remove(&cell) {
            return false;
        }
        if self.queue.len() > 2 * self.members.len() + 16 {
            let members = &self.members;
            self.queue.retain(|c| members.contains(c));
        }
        true
    }

    /// Empty the fringe, returning the live cells in queue order.
    pub(crate) fn drain(&mut self) -> Vec<CellIndex> {
        let out: Vec<CellIndex> = self.iter().collect();
        self.queue.clear();
        self.members.clear();
        out
    }

    /// Whether `cell` is queued.
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.members.contains(&cell)
    }

    /// Number of queued cells.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Queued cells, earliest first.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.queue
            .iter()
            .copied()
            .filter(|c| self.members.contains(c))
    }
}

// ── CellGroup ───────────────────────────────────────────────────

/// A growable region of cells sharing one fluid mixture.
///
/// Created through [`Simulation::create_group`](crate::Simulation::create_group).
/// Flags and fluids may be changed through a [`GroupHandle`] from
/// [`Simulation::group_mut`](crate::Simulation::group_mut); cell membership
/// is only changed by the simulation.
#[derive(Clone, Debug)]
pub struct CellGroup {
    id: GroupId,
    cells: IndexSet<CellIndex>,
    fringe: Fringe,
    fluids: FluidMixture,
    linked: IndexSet<GroupId>,
    state: GroupState,
}

impl CellGroup {
    pub(crate) fn new(id: GroupId, simulate: bool) -> Self {
        Self {
            id,
            cells: IndexSet::new(),
            fringe: Fringe::default(),
            fluids: FluidMixture::new(),
            linked: IndexSet::new(),
            state: if simulate {
                GroupState::Growing
            } else {
                GroupState::Dormant
            },
        }
    }

    /// The group's id.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Member cells in absorption order.
    pub fn cells(&self) -> &IndexSet<CellIndex> {
        &self.cells
    }

    /// Number of member cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the group has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` is a member.
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }

    /// Groupless neighbour cells awaiting absorption.
    pub fn fringe(&self) -> &Fringe {
        &self.fringe
    }

    /// The group's fluid content.
    pub fn fluids(&self) -> &FluidMixture {
        &self.fluids
    }

    /// Groups bordering this one (non-owning).
    pub fn linked_groups(&self) -> &IndexSet<GroupId> {
        &self.linked
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GroupState {
        self.state
    }

    /// Whether the group is switched on.
    pub fn enabled(&self) -> bool {
        self.state.is_active()
    }

    /// Whether phases should process the group.
    pub fn simulate(&self) -> bool {
        self.state.is_active()
    }

    /// Whether the group may still absorb fringe cells.
    pub fn expand(&self) -> bool {
        self.state == GroupState::Growing
    }

    /// Whether the group has settled.
    pub fn stable(&self) -> bool {
        self.state == GroupState::Stable
    }

    pub(crate) fn add_fluid(&mut self, fluid: Fluid) -> MixOutcome {
        self.fluids.add(fluid)
    }

    pub(crate) fn activate(&mut self) {
        if self.state == GroupState::Dormant {
            self.state = GroupState::Growing;
        }
    }

    pub(crate) fn deactivate(&mut self) {
        self.state = GroupState::Dormant;
    }

    /// Whether Expand may pick this group.
    pub(crate) fn can_expand(&self) -> bool {
        self.expand() && !self.fringe.is_empty()
    }

    pub(crate) fn set_state(&mut self, state: GroupState) {
        self.state = state;
    }

    pub(crate) fn link(&mut self, other: GroupId) {
        if other != self.id {
            self.linked.insert(other);
        }
    }

    pub(crate) fn pop_fringe(&mut self) -> Option<CellIndex> {
        self.fringe.pop()
    }

    pub(crate) fn drain_fringe(&mut self) -> Vec<CellIndex> {
        self.fringe.drain()
    }

    pub(crate) fn forget_fringe_cell(&mut self, cell: CellIndex) -> bool {
        self.fringe.remove(cell)
    }

    /// Absorb a groupless cell and queue its groupless neighbours.
    ///
    /// A no-op returning `false` if the cell already has an owner. The
    /// caller must have checked that `cell` exists in `graph`.
    pub(crate) fn add(&mut self, graph: &mut CellGraph, cell: CellIndex) -> bool {
        let Some(target) = graph.get_mut(cell) else {
            return false;
        };
        if target.is_grouped() {
            return false;
        }
        target.assign_group(self.id);
        self.cells.insert(cell);
        self.fringe.remove(cell);

        for &nb in graph.neighbours(cell) {
            let free = graph.get(nb).is_some_and(|c| !c.is_grouped());
            if free && !self.cells.contains(&nb) {
                self.fringe.push(nb);
            }
        }

        if self.state == GroupState::Stable && !self.fringe.is_empty() {
            self.state = GroupState::Growing;
        }
        true
    }
}

// ── GroupHandle ────────────────────────────────────────────────

/// Mutable access to one group's fluids and on/off switch.
///
/// Handed out by [`Simulation::group_mut`](crate::Simulation::group_mut)
/// and [`PhaseContext::group_mut`](crate::PhaseContext::group_mut). Reads
/// go through [`Deref`] to the [`CellGroup`]; the group itself can never be
/// moved, replaced or reordered through a handle, so a group's id always
/// matches its position in the simulation.
///
/// ```compile_fail
/// use gassim_core::UniqueCellId;
/// use gassim_engine::{Simulation, SimulationConfig};
/// use gassim_space::{EdgeBehavior, Square4Grid};
///
/// let grid = Square4Grid::new(2, 2, EdgeBehavior::Absorb).unwrap();
/// let mut sim = Simulation::new(grid.build(&UniqueCellId::new()), SimulationConfig::default()).unwrap();
/// let a = sim.create_group(true);
/// let b = sim.create_group(true);
/// let copy = sim.group(b).unwrap().clone();
/// // Handles do not give out `&mut CellGroup`.
/// *sim.group_mut(a).unwrap() = copy;
/// ```
#[derive(Debug)]
pub struct GroupHandle<'a> {
    group: &'a mut CellGroup,
}

impl<'a> GroupHandle<'a> {
    pub(crate) fn new(group: &'a mut CellGroup) -> Self {
        Self { group }
    }

    /// Add a fluid, mixing it with an existing entry of the same id.
    pub fn add_fluid(&mut self, fluid: Fluid) -> MixOutcome {
        self.group.add_fluid(fluid)
    }

    /// Switch a dormant group on. Other states are left alone.
    pub fn activate(&mut self) {
        self.group.activate();
    }

    /// Switch the group off.
    pub fn deactivate(&mut self) {
        self.group.deactivate();
    }
}

impl Deref for GroupHandle<'_> {
    type Target = CellGroup;

    fn deref(&self) -> &CellGroup {
        self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gassim_core::{CellId, UniqueCellId};
    use gassim_space::{EdgeBehavior, Square4Grid};

    fn grid3() -> (Square4Grid, CellGraph) {
        let g = Square4Grid::new(3, 3, EdgeBehavior::Absorb).unwrap();
        let graph = g.build(&UniqueCellId::new());
        (g, graph)
    }

    #[test]
    fn fringe_is_fifo_and_deduplicated() {
        let mut f = Fringe::default();
        assert!(f.push(CellIndex(3)));
        assert!(f.push(CellIndex(1)));
        assert!(!f.push(CellIndex(3)));
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop(), Some(CellIndex(3)));
        assert_eq!(f.pop(), Some(CellIndex(1)));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn fringe_remove_skips_entry() {
        let mut f = Fringe::default();
        for i in 0..4 {
            f.push(CellIndex(i));
        }
        assert!(f.remove(CellIndex(1)));
        assert!(!f.remove(CellIndex(1)));
        let order: Vec<_> = f.iter().collect();
        assert_eq!(order, [CellIndex(0), CellIndex(2), CellIndex(3)]);
        assert_eq!(f.drain(), order);
        assert!(f.is_empty());
    }

    #[test]
    fn fringe_compacts_after_many_removals() {
        let mut f = Fringe::default();
        for i in 0..100 {
            f.push(CellIndex(i));
        }
        for i in 0..90 {
            f.remove(CellIndex(i));
        }
        assert_eq!(f.len(), 10);
        assert!(f.queue.len() <= 2 * f.len() + 16);
        assert_eq!(f.pop(), Some(CellIndex(90)));
    }

    #[test]
    fn new_group_state_follows_simulate_flag() {
        let g = CellGroup::new(GroupId(0), true);
        assert_eq!(g.state(), GroupState::Growing);
        assert!(g.enabled() && g.simulate() && g.expand() && !g.stable());

        let g = CellGroup::new(GroupId(1), false);
        assert_eq!(g.state(), GroupState::Dormant);
        assert!(!g.enabled() && !g.simulate() && !g.expand());
    }

    #[test]
    fn activate_and_deactivate() {
        let mut g = CellGroup::new(GroupId(0), false);
        g.activate();
        assert_eq!(g.state(), GroupState::Growing);
        g.set_state(GroupState::Capped);
        g.activate();
        assert_eq!(g.state(), GroupState::Capped);
        g.deactivate();
        assert_eq!(g.state(), GroupState::Dormant);
    }

    #[test]
    fn add_claims_cell_and_queues_free_neighbours() {
        let (grid, mut graph) = grid3();
        let mut g = CellGroup::new(GroupId(0), true);
        let centre = grid.index(1, 1).unwrap();
        assert!(g.add(&mut graph, centre));
        assert_eq!(graph.get(centre).unwrap().group(), Some(GroupId(0)));
        let queued: Vec<_> = g.fringe().iter().collect();
        assert_eq!(queued, graph.neighbours(centre));
        assert!(!g.fringe().contains(centre));
    }

    #[test]
    fn add_is_noop_for_owned_cell() {
        let (grid, mut graph) = grid3();
        let mut a = CellGroup::new(GroupId(0), true);
        let mut b = CellGroup::new(GroupId(1), true);
        let cell = grid.index(0, 0).unwrap();
        assert!(a.add(&mut graph, cell));
        assert!(!b.add(&mut graph, cell));
        assert!(b.is_empty());
        assert!(b.fringe().is_empty());
        assert!(!a.add(&mut graph, cell));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn add_skips_owned_neighbours() {
        let (grid, mut graph) = grid3();
        let mut a = CellGroup::new(GroupId(0), true);
        let mut b = CellGroup::new(GroupId(1), true);
        a.add(&mut graph, grid.index(0, 1).unwrap());
        b.add(&mut graph, grid.index(0, 0).unwrap());
        // (0,0)'s neighbours are (0,1), owned by a, and (1,0).
        let queued: Vec<_> = b.fringe().iter().collect();
        assert_eq!(queued, [grid.index(1, 0).unwrap()]);
    }

    #[test]
    fn add_unknown_cell_is_refused() {
        let (_, mut graph) = grid3();
        let mut g = CellGroup::new(GroupId(0), true);
        assert!(!g.add(&mut graph, CellIndex(99)));
        assert!(g.is_empty());
    }

    #[test]
    fn stable_group_regrows_when_fringe_reopens() {
        let mut graph = CellGraph::new();
        let a = graph.insert(CellId(1), &[]).unwrap();
        let b = graph.insert(CellId(2), &[a]).unwrap();
        let mut g = CellGroup::new(GroupId(0), true);
        g.set_state(GroupState::Stable);
        g.add(&mut graph, a);
        assert_eq!(g.state(), GroupState::Growing);
        assert!(g.fringe().contains(b));
    }

    #[test]
    fn handle_forwards_fluids_and_switches() {
        let mut g = CellGroup::new(GroupId(3), false);
        {
            let mut h = GroupHandle::new(&mut g);
            h.activate();
            assert_eq!(h.state(), GroupState::Growing);
            h.add_fluid(Fluid::new("Oxygen", "Oxygen", 1.0, 280.0).unwrap());
            assert_eq!(h.id(), GroupId(3));
            h.deactivate();
        }
        assert_eq!(g.state(), GroupState::Dormant);
        assert!(g.fluids().contains("Oxygen"));
    }

    #[test]
    fn link_ignores_self() {
        let mut g = CellGroup::new(GroupId(2), true);
        g.link(GroupId(2));
        g.link(GroupId(5));
        g.link(GroupId(5));
        assert_eq!(g.linked_groups().len(), 1);
    }
}
