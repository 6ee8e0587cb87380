//! The simulation: group orchestration and the budgeted tick.
//!
//! [`Simulation`] owns the cell universe and every [`CellGroup`]. Each tick
//! spends a step budget across three phases:
//!
//! 1. **Expand**: breadth-first absorption of fringe cells into the first
//!    eligible group, one step per absorbed cell, with split-on-overflow
//!    once a group reaches `max_group_size`.
//! 2. **Transfer**: fluid exchange between linked groups (pluggable).
//! 3. **Split**: subdivision of formed groups (pluggable).
//!
//! The tick gives each phase an equal third of the budget, then offers
//! whatever is left to the phases again in the same order.

use std::time::Instant;

use gassim_core::{CellIndex, Fluid, FluidMixture, GroupError, GroupId, MixOutcome, TickId};
use gassim_space::CellGraph;

use crate::config::{ConfigError, SimulationConfig};
use crate::group::{CellGroup, GroupHandle, GroupState};
use crate::metrics::TickMetrics;
use crate::phase::{PassThroughPhase, Phase, PhaseContext};

/// The three tick phases, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PhaseKind {
    Expand,
    Transfer,
    Split,
}

const PHASE_ORDER: [PhaseKind; 3] = [PhaseKind::Expand, PhaseKind::Transfer, PhaseKind::Split];

/// Counters accumulated by expansion between ticks.
#[derive(Clone, Copy, Debug, Default)]
struct ExpandCounters {
    cells_absorbed: u32,
    groups_spawned: u32,
}

/// A set of cell groups evolving over a shared cell universe.
///
/// Single-threaded: every method runs to completion. A host that shares a
/// simulation between threads must hold exclusive access for a whole tick.
///
/// # Examples
///
/// ```
/// use gassim_core::{Fluid, UniqueCellId};
/// use gassim_engine::{Simulation, SimulationConfig};
/// use gassim_space::{EdgeBehavior, Square4Grid};
///
/// let grid = Square4Grid::new(4, 4, EdgeBehavior::Absorb).unwrap();
/// let mut sim = Simulation::new(grid.build(&UniqueCellId::new()), SimulationConfig::default()).unwrap();
///
/// let g = sim.create_group(true);
/// sim.add_cell(g, grid.index(0, 0).unwrap()).unwrap();
/// sim.add_fluid(g, Fluid::new("Oxygen", "Oxygen", 101.6, 290.0).unwrap()).unwrap();
///
/// let metrics = sim.simulate_steps(6);
/// assert_eq!(metrics.cells_absorbed, 6);
/// assert_eq!(sim.group(g).unwrap().len(), 7);
/// assert!(!sim.stable());
/// ```
pub struct Simulation {
    graph: CellGraph,
    groups: Vec<CellGroup>,
    config: SimulationConfig,
    transfer: Box<dyn Phase>,
    split: Box<dyn Phase>,
    stable: bool,
    tick: TickId,
    counters: ExpandCounters,
    last_metrics: TickMetrics,
}

impl Simulation {
    /// Build a simulation over `graph` with no groups.
    ///
    /// Every cell must be groupless; a graph with an owned cell is rejected
    /// with [`ConfigError::GroupedCell`]. Transfer and split start as
    /// [`PassThroughPhase`]s.
    pub fn new(graph: CellGraph, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some((cell, group)) = graph
            .iter()
            .find_map(|(index, c)| c.group().map(|g| (index, g)))
        {
            return Err(ConfigError::GroupedCell { cell, group });
        }
        Ok(Self {
            graph,
            groups: Vec::new(),
            config,
            transfer: Box::new(PassThroughPhase::transfer()),
            split: Box::new(PassThroughPhase::split()),
            stable: false,
            tick: TickId(0),
            counters: ExpandCounters::default(),
            last_metrics: TickMetrics::default(),
        })
    }

    /// Replace the transfer and split phases.
    pub fn with_phases(mut self, transfer: Box<dyn Phase>, split: Box<dyn Phase>) -> Self {
        self.transfer = transfer;
        self.split = split;
        self
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// The cell universe.
    pub fn graph(&self) -> &CellGraph {
        &self.graph
    }

    /// All groups in creation order.
    pub fn groups(&self) -> &[CellGroup] {
        &self.groups
    }

    /// Look up a group.
    pub fn group(&self, id: GroupId) -> Option<&CellGroup> {
        self.groups.get(id.index())
    }

    /// Look up a group for flag or fluid changes.
    pub fn group_mut(&mut self, id: GroupId) -> Option<GroupHandle<'_>> {
        self.groups.get_mut(id.index()).map(GroupHandle::new)
    }

    /// The group that owns `cell`, if any.
    pub fn group_of(&self, cell: CellIndex) -> Option<&CellGroup> {
        self.graph.get(cell)?.group().and_then(|g| self.group(g))
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Cell count at which groups stop expanding.
    pub fn max_group_size(&self) -> u32 {
        self.config.max_group_size
    }

    /// Change the group size cap. Rejects zero.
    pub fn set_max_group_size(&mut self, size: u32) -> Result<(), ConfigError> {
        let next = SimulationConfig {
            max_group_size: size,
            ..self.config
        };
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// Budget used by [`simulate`](Self::simulate).
    pub fn max_steps_to_simulate(&self) -> u32 {
        self.config.max_steps_to_simulate
    }

    /// Change the default tick budget.
    pub fn set_max_steps_to_simulate(&mut self, steps: u32) {
        self.config.max_steps_to_simulate = steps;
    }

    /// Whether the last tick consumed no budget at all.
    pub fn stable(&self) -> bool {
        self.stable
    }

    /// Number of ticks run so far.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    // ── Group construction ─────────────────────────────────────────

    /// Append an empty group. `simulate = false` creates it dormant.
    pub fn create_group(&mut self, simulate: bool) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        self.groups.push(CellGroup::new(id, simulate));
        log::debug!("created group {id} (simulate={simulate})");
        id
    }

    /// Append a group pre-seeded with `cells` and `fluids`.
    ///
    /// Cells are absorbed in order exactly as [`add_cell`](Self::add_cell)
    /// would, building the fringe from their neighbours; cells already
    /// owned elsewhere are skipped. Every index is checked first, so an
    /// unknown cell fails the call without creating anything.
    pub fn create_group_with(
        &mut self,
        simulate: bool,
        cells: &[CellIndex],
        fluids: FluidMixture,
    ) -> Result<GroupId, GroupError> {
        for &cell in cells {
            self.check_cell(cell)?;
        }
        let id = self.create_group(simulate);
        for &cell in cells {
            self.absorb(id, cell);
        }
        for fluid in fluids.iter() {
            self.groups[id.index()].add_fluid(fluid.clone());
        }
        Ok(id)
    }

    /// Absorb `cell` into `group`.
    ///
    /// Returns `Ok(false)` without changes if the cell already has an owner.
    pub fn add_cell(&mut self, group: GroupId, cell: CellIndex) -> Result<bool, GroupError> {
        self.check_group(group)?;
        self.check_cell(cell)?;
        Ok(self.absorb(group, cell))
    }

    /// Add a fluid to a group's mixture.
    pub fn add_fluid(&mut self, group: GroupId, fluid: Fluid) -> Result<MixOutcome, GroupError> {
        self.check_group(group)?;
        Ok(self.groups[group.index()].add_fluid(fluid))
    }

    /// Add a fluid to whichever group owns `cell`.
    ///
    /// Returns `Ok(false)` if the cell has no group; no group is created.
    pub fn add_fluid_to_cell(&mut self, cell: CellIndex, fluid: Fluid) -> Result<bool, GroupError> {
        self.check_cell(cell)?;
        match self.graph.get(cell).and_then(|c| c.group()) {
            Some(group) => {
                self.groups[group.index()].add_fluid(fluid);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Phases ─────────────────────────────────────────────────────

    /// Budgeted breadth-first absorption.
    ///
    /// Picks the first group (in creation order) that is growing and has a
    /// non-empty fringe, then absorbs fringe cells in FIFO order at one
    /// step each until the budget or the fringe runs out. When the group
    /// reaches `max_group_size` it is capped and every remaining fringe
    /// cell becomes a new singleton group carrying a copy of the parent's
    /// fluids. Returns the unspent budget.
    pub fn expand(&mut self, budget: u32) -> u32 {
        if budget == 0 {
            return 0;
        }
        let Some(gid) = self.groups.iter().find(|g| g.can_expand()).map(CellGroup::id) else {
            return budget;
        };

        let cap = self.config.max_group_size as usize;
        let mut remaining = budget;
        while remaining > 0 {
            let Some(cell) = self.groups[gid.index()].pop_fringe() else {
                break;
            };
            let absorbed = self.absorb(gid, cell);
            debug_assert!(absorbed, "fringe of group {gid} held owned cell {cell}");
            if !absorbed {
                continue;
            }
            self.counters.cells_absorbed += 1;
            if self.groups[gid.index()].len() >= cap {
                self.cap_and_shed(gid);
            }
            remaining -= 1;
        }

        let group = &mut self.groups[gid.index()];
        if group.state() == GroupState::Growing && group.fringe().is_empty() {
            group.set_state(GroupState::Stable);
            log::debug!("group {gid} settled at {} cells", group.len());
        }
        remaining
    }

    /// Run the transfer phase with `budget`, returning the remainder.
    pub fn transfer(&mut self, budget: u32) -> u32 {
        let mut ctx = PhaseContext::new(&self.graph, &mut self.groups, self.config.max_group_size);
        self.transfer.run(&mut ctx, budget).min(budget)
    }

    /// Run the split phase with `budget`, returning the remainder.
    pub fn split(&mut self, budget: u32) -> u32 {
        let mut ctx = PhaseContext::new(&self.graph, &mut self.groups, self.config.max_group_size);
        self.split.run(&mut ctx, budget).min(budget)
    }

    /// Run one tick with the configured `max_steps_to_simulate` budget.
    pub fn simulate(&mut self) -> &TickMetrics {
        self.simulate_steps(self.config.max_steps_to_simulate)
    }

    /// Run one tick with an explicit budget.
    ///
    /// Expand, transfer and split each get `budget / 3` in that order; any
    /// budget still unspent is then offered to expand, transfer and split
    /// again, stopping as soon as it is used up. The simulation is marked
    /// stable when the tick consumed nothing.
    pub fn simulate_steps(&mut self, budget: u32) -> &TickMetrics {
        let tick_start = Instant::now();
        self.counters = ExpandCounters::default();
        let mut consumed_by = [0u32; 3];

        let init = budget / 3;
        let mut remaining = budget;
        for (slot, kind) in PHASE_ORDER.into_iter().enumerate() {
            let used = self.run_phase(kind, init);
            consumed_by[slot] += used;
            remaining -= used;
        }
        for (slot, kind) in PHASE_ORDER.into_iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let used = self.run_phase(kind, remaining);
            consumed_by[slot] += used;
            remaining -= used;
        }

        self.stable = remaining == budget;
        self.tick = TickId(self.tick.0 + 1);
        self.last_metrics = TickMetrics {
            tick: self.tick,
            budget,
            consumed: budget - remaining,
            phase_steps: vec![
                ("expand".to_string(), consumed_by[0]),
                (self.transfer.name().to_string(), consumed_by[1]),
                (self.split.name().to_string(), consumed_by[2]),
            ],
            cells_absorbed: self.counters.cells_absorbed,
            groups_spawned: self.counters.groups_spawned,
            total_us: tick_start.elapsed().as_micros() as u64,
        };
        debug_assert!(
            self.invariant_violation().is_none(),
            "{:?}",
            self.invariant_violation()
        );
        log::debug!(
            "tick {}: consumed {}/{} steps, absorbed {} cells, spawned {} groups, stable={}",
            self.tick,
            budget - remaining,
            budget,
            self.last_metrics.cells_absorbed,
            self.last_metrics.groups_spawned,
            self.stable
        );
        &self.last_metrics
    }

    /// Tick until a tick reports stable or `max_ticks` have run.
    ///
    /// Checks stability before each tick, so a simulation that is already
    /// stable runs nothing. Returns the number of ticks run.
    pub fn run_until_stable(&mut self, max_ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && !self.stable {
            self.simulate();
            ran += 1;
        }
        ran
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Run one phase and return the steps it consumed.
    fn run_phase(&mut self, kind: PhaseKind, budget: u32) -> u32 {
        let left = match kind {
            PhaseKind::Expand => self.expand(budget),
            PhaseKind::Transfer => self.transfer(budget),
            PhaseKind::Split => self.split(budget),
        };
        debug_assert!(left <= budget);
        budget - left
    }

    /// Move a groupless cell into `group` and drop it from every other
    /// group's fringe. Returns `false` if the cell was already owned.
    fn absorb(&mut self, group: GroupId, cell: CellIndex) -> bool {
        if !self.groups[group.index()].add(&mut self.graph, cell) {
            return false;
        }
        for other in &mut self.groups {
            if other.id() != group {
                other.forget_fringe_cell(cell);
            }
        }
        log::trace!("group {group} absorbed cell {cell}");
        true
    }

    /// Stop `parent` expanding and turn its fringe into seed groups.
    fn cap_and_shed(&mut self, parent: GroupId) {
        self.groups[parent.index()].set_state(GroupState::Capped);
        let frontier = self.groups[parent.index()].drain_fringe();
        let mixture = self.groups[parent.index()].fluids().clone();
        log::debug!(
            "group {parent} capped at {} cells, shedding {} fringe cells",
            self.groups[parent.index()].len(),
            frontier.len()
        );

        for cell in frontier {
            let child = GroupId(self.groups.len() as u32);
            self.groups.push(CellGroup::new(child, true));
            let absorbed = self.absorb(child, cell);
            debug_assert!(absorbed, "shed fringe cell {cell} was already owned");
            if !absorbed {
                continue;
            }
            for fluid in mixture.iter() {
                self.groups[child.index()].add_fluid(fluid.clone());
            }
            self.groups[parent.index()].link(child);
            self.groups[child.index()].link(parent);
            self.counters.groups_spawned += 1;
            log::trace!("group {child} seeded from {parent} at cell {cell}");
        }
    }

    fn check_cell(&self, cell: CellIndex) -> Result<(), GroupError> {
        if self.graph.contains(cell) {
            Ok(())
        } else {
            Err(GroupError::UnknownCell {
                cell,
                cell_count: self.graph.len(),
            })
        }
    }

    fn check_group(&self, group: GroupId) -> Result<(), GroupError> {
        if group.index() < self.groups.len() {
            Ok(())
        } else {
            Err(GroupError::UnknownGroup {
                group,
                group_count: self.groups.len(),
            })
        }
    }

    /// Describe the first broken membership or fringe invariant, if any.
    fn invariant_violation(&self) -> Option<String> {
        for group in &self.groups {
            for &cell in group.cells() {
                let owner = self.graph.get(cell).and_then(|c| c.group());
                if owner != Some(group.id()) {
                    return Some(format!(
                        "cell {cell} in group {} but points at {owner:?}",
                        group.id()
                    ));
                }
            }
            for cell in group.fringe().iter() {
                if group.contains(cell) {
                    return Some(format!("cell {cell} in both cells and fringe of {}", group.id()));
                }
                if self.graph.get(cell).is_some_and(|c| c.is_grouped()) {
                    return Some(format!("owned cell {cell} in fringe of {}", group.id()));
                }
            }
        }
        for (index, cell) in self.graph.iter() {
            if let Some(owner) = cell.group() {
                if !self.group(owner).is_some_and(|g| g.contains(index)) {
                    return Some(format!("cell {index} points at {owner} which lacks it"));
                }
            }
        }
        None
    }
}
