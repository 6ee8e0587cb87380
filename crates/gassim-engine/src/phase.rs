//! The [`Phase`] trait and its step context.
//!
//! A tick runs three phases in a fixed order: expand, transfer, split.
//! Expand is built into [`Simulation`](crate::Simulation); transfer and
//! split are pluggable so that inter-group fluid flow and group
//! subdivision policies can be added without touching expansion or the
//! tick composition. Both default to [`PassThroughPhase`].

use gassim_core::GroupId;
use gassim_space::CellGraph;

use crate::group::{CellGroup, GroupHandle};

/// Everything a phase may see and change during one call.
///
/// Groups can be read in full, and their fluids and flags changed through
/// [`group_mut`](Self::group_mut). Cell membership and group order cannot
/// be changed: only the simulation moves cells between groups.
pub struct PhaseContext<'a> {
    graph: &'a CellGraph,
    groups: &'a mut [CellGroup],
    max_group_size: u32,
}

impl<'a> PhaseContext<'a> {
    pub(crate) fn new(
        graph: &'a CellGraph,
        groups: &'a mut [CellGroup],
        max_group_size: u32,
    ) -> Self {
        Self {
            graph,
            groups,
            max_group_size,
        }
    }

    /// The cell universe, read-only.
    pub fn graph(&self) -> &CellGraph {
        self.graph
    }

    /// All groups in creation order.
    pub fn groups(&self) -> &[CellGroup] {
        &*self.groups
    }

    /// One group, for fluid or on/off changes. `None` for an unknown id.
    pub fn group_mut(&mut self, id: GroupId) -> Option<GroupHandle<'_>> {
        self.groups.get_mut(id.index()).map(GroupHandle::new)
    }

    /// The configured group size cap.
    pub fn max_group_size(&self) -> u32 {
        self.max_group_size
    }
}

/// A budgeted step of the per-tick pipeline.
///
/// # Contract
///
/// - `run()` receives a step budget and returns the unspent remainder.
///   The simulation clamps the return value to `[0, budget]`.
/// - A budget of zero must be accepted and should do no work.
///
/// # Examples
///
/// A phase that spends one step per simulated group:
///
/// ```
/// use gassim_engine::{Phase, PhaseContext};
///
/// struct Census;
///
/// impl Phase for Census {
///     fn name(&self) -> &str { "census" }
///
///     fn run(&mut self, ctx: &mut PhaseContext<'_>, budget: u32) -> u32 {
///         let active = ctx.groups().iter().filter(|g| g.simulate()).count() as u32;
///         budget.saturating_sub(active)
///     }
/// }
///
/// assert_eq!(Census.name(), "census");
/// ```
pub trait Phase: Send + 'static {
    /// Human-readable name for logs and metrics.
    fn name(&self) -> &str;

    /// Spend up to `budget` steps and return what is left.
    fn run(&mut self, ctx: &mut PhaseContext<'_>, budget: u32) -> u32;
}

/// A phase that does nothing and hands the budget straight back.
///
/// The default transfer and split phases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassThroughPhase {
    name: &'static str,
}

impl PassThroughPhase {
    /// Placeholder for fluid transfer between linked groups.
    pub fn transfer() -> Self {
        Self { name: "transfer" }
    }

    /// Placeholder for subdividing formed groups.
    pub fn split() -> Self {
        Self { name: "split" }
    }
}

impl Phase for PassThroughPhase {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&mut self, _ctx: &mut PhaseContext<'_>, budget: u32) -> u32 {
        budget
    }
}
