//! Integration test: the two-corner oxygen/hydrogen world.
//!
//! A 10x10 grid seeded with oxygen at the top-left and hydrogen at the
//! bottom-right, ticked with a 10-step budget. The first tick must absorb
//! exactly 10 cells breadth-first into the first eligible group, and
//! repeated ticks must eventually group every cell and settle.

use gassim_engine::GroupState;
use gassim_test_utils::{assert_invariants, two_corner_world};

#[test]
fn first_tick_absorbs_ten_cells_breadth_first() {
    let (mut world, o2, h2) = two_corner_world();
    assert_eq!(world.sim.graph().grouped_count(), 2);

    let metrics = world.sim.simulate().clone();
    assert_eq!(metrics.budget, 10);
    assert_eq!(metrics.consumed, 10);
    assert_eq!(metrics.cells_absorbed, 10);
    assert_eq!(metrics.steps_for("expand"), 10);
    assert!(!world.sim.stable());
    assert_eq!(world.sim.graph().grouped_count(), 12);

    // Expand always serves the first eligible group.
    let oxygen = world.sim.group(o2).unwrap();
    let hydrogen = world.sim.group(h2).unwrap();
    assert_eq!(oxygen.len(), 11);
    assert_eq!(hydrogen.len(), 1);
    assert_eq!(oxygen.state(), GroupState::Growing);

    // Distances 1..=3 from the corner hold 9 cells; one more comes from
    // the distance-4 ring.
    let mut by_distance = [0u32; 5];
    for &cell in oxygen.cells() {
        let d = world.distance(0, 0, cell) as usize;
        assert!(d < by_distance.len(), "cell {cell} absorbed out of BFS order");
        by_distance[d] += 1;
    }
    assert_eq!(by_distance, [1, 2, 3, 4, 1]);
    assert!(oxygen.fluids().contains("Oxygen"));
    assert!(!oxygen.fluids().contains("Hydrogen"));
    assert_invariants(&world.sim);
}

#[test]
fn repeated_ticks_group_every_cell_and_settle() {
    let (mut world, _, _) = two_corner_world();
    let ticks = world.sim.run_until_stable(100);
    assert!(world.sim.stable());
    assert!(ticks < 100, "did not settle, ran {ticks} ticks");
    assert_eq!(world.sim.graph().grouped_count(), 100);
    assert_invariants(&world.sim);

    // Nothing left to absorb: expand hands the budget straight back.
    assert_eq!(world.sim.expand(17), 17);
    assert!(world.sim.groups().iter().all(|g| g.fringe().is_empty()));
}

#[test]
fn capped_groups_shed_linked_children_with_parent_fluids() {
    let (mut world, o2, _) = two_corner_world();
    world.sim.run_until_stable(100);

    let oxygen = world.sim.group(o2).unwrap();
    assert_eq!(oxygen.state(), GroupState::Capped);
    assert_eq!(oxygen.len(), 30);
    assert!(!oxygen.linked_groups().is_empty());
    for &child in oxygen.linked_groups() {
        let child = world.sim.group(child).unwrap();
        assert!(child.linked_groups().contains(&o2));
        assert_eq!(child.fluids().get("Oxygen"), oxygen.fluids().get("Oxygen"));
    }
}

#[test]
fn dormant_groups_are_left_alone() {
    let (mut world, o2, h2) = two_corner_world();
    world.sim.group_mut(o2).unwrap().deactivate();
    world.sim.simulate();
    assert_eq!(world.sim.group(o2).unwrap().len(), 1);
    assert_eq!(world.sim.group(h2).unwrap().len(), 11);

    world.sim.group_mut(h2).unwrap().deactivate();
    world.sim.simulate();
    assert!(world.sim.stable());
    assert_eq!(world.sim.graph().grouped_count(), 12);
}
