//! End-to-end tests of the redundancy search through the public trait.

use super::test_utils::*;
use crate::kinematic_traits::{IkError, Kinematics, Pose, SliceSolver};
use crate::kinematics_impl::RedundantKinematics;
use rand::Rng;
use std::cell::Cell;
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Duration;

const GENEROUS: Duration = Duration::from_secs(10);

#[test]
fn single_slice_round_trip() {
    let solver = solver();
    let reference = vec![0.3, 0.5, -0.4, 0.2];
    let target = solver.forward(&reference).unwrap();

    let solution = solver.inverse(&target, &reference).unwrap();
    let reached = solver.forward(&solution).unwrap();
    assert_pose_eq(&reached, &target, 1e-9);
    assert!((solution[0] - 0.3).abs() < 1e-12);
}

#[test]
fn random_configurations_round_trip() {
    let solver = solver();
    let mut rng = rand::thread_rng();
    for _ in 0..25 {
        let reference: Vec<f64> = (0..4).map(|_| rng.gen_range(-3.0..3.0)).collect();
        let target = solver.forward(&reference).unwrap();
        let solution = solver.inverse(&target, &reference).unwrap();
        let reached = solver.forward(&solution).unwrap();
        assert_pose_eq(&reached, &target, 1e-8);
    }
}

#[test]
fn search_walks_to_the_reachable_slice() {
    let solver = solver();
    let seed = vec![0.5, 0.0, 0.0, 0.0];

    let solution = solver.inverse_search(&rim_target(), &seed, GENEROUS).unwrap();
    // The rim target is reachable only below ~0.2165; stepping down from
    // 0.5 in 0.02 steps, the first slice inside that range is 0.2.
    assert!((solution[0] - 0.2).abs() < 1e-9);
    let reached = solver.forward(&solution).unwrap();
    assert_pose_eq(&reached, &rim_target(), 1e-9);
}

#[test]
fn exhausted_domain_reports_no_solution() {
    let solver = solver();
    let seed = vec![0.0, 0.0, 0.0, 0.0];
    // The budget is far larger than a full sweep needs, so the distinct
    // timeout outcome must not appear.
    assert_eq!(
        solver.inverse_search(&unreachable_target(), &seed, GENEROUS),
        Err(IkError::NoSolution)
    );
}

#[test]
fn zero_budget_times_out_unless_the_seed_slice_succeeds() {
    let solver = solver();
    let seed = vec![0.5, 0.0, 0.0, 0.0];

    // The seed's own slice cannot reach the rim target, and there is no
    // time to look further.
    assert_eq!(
        solver.inverse_search(&rim_target(), &seed, Duration::ZERO),
        Err(IkError::TimedOut)
    );

    // The easy target is reachable at the seed slice itself; offset 0 is
    // examined before the deadline.
    let solution = solver
        .inverse_search(&easy_target(), &seed, Duration::ZERO)
        .unwrap();
    assert!((solution[0] - 0.5).abs() < 1e-12);
}

#[test]
fn consistency_limit_restricts_the_sweep() {
    let solver = solver();
    let seed = vec![0.5, 0.0, 0.0, 0.0];

    // The reachable slices sit more than 0.25 below the seed.
    assert_eq!(
        solver.inverse_search_within(&rim_target(), &seed, GENEROUS, &[0.25; 4]),
        Err(IkError::NoSolution)
    );

    // A wider window reaches them, and the winner stays inside it.
    let solution = solver
        .inverse_search_within(&rim_target(), &seed, GENEROUS, &[0.35; 4])
        .unwrap();
    assert!((solution[0] - 0.5).abs() <= 0.35 + 1e-12);
}

#[test]
fn rejecting_validator_forces_no_solution_in_every_variant() {
    let solver = solver();
    let seed = vec![0.1, 0.2, 0.3, 0.0];
    let reject = |_: &[f64], _: &Pose| false;

    assert_eq!(
        solver.inverse_search_validated(&easy_target(), &seed, GENEROUS, &reject),
        Err(IkError::NoSolution)
    );
    assert_eq!(
        solver.inverse_search_within_validated(&easy_target(), &seed, GENEROUS, &[1.0; 4], &reject),
        Err(IkError::NoSolution)
    );
}

#[test]
fn validator_rejections_continue_the_sweep() {
    let solver = solver();
    let seed = vec![0.5, 0.0, 0.0, 0.0];
    let calls = Cell::new(0u32);
    let target = easy_target();

    let picky = |candidate: &[f64], reached: &Pose| {
        calls.set(calls.get() + 1);
        assert_pose_eq(reached, &target, 1e-9);
        candidate[0] < 0.15
    };
    let solution = solver
        .inverse_search_validated(&target, &seed, GENEROUS, &picky)
        .unwrap();

    // Stepping down from 0.5, the first slice below 0.15 is 0.14; every
    // slice before it is reachable, valid, and rejected by the caller.
    assert!((solution[0] - 0.14).abs() < 1e-9);
    assert_eq!(calls.get(), 37);
}

#[test]
fn identical_searches_return_identical_solutions() {
    let solver = solver();
    let seed = vec![0.5, 0.0, 0.0, 0.0];

    let first = solver.inverse_search(&rim_target(), &seed, GENEROUS).unwrap();
    let second = solver.inverse_search(&rim_target(), &seed, GENEROUS).unwrap();
    assert_eq!(first, second);

    let accept_low = |candidate: &[f64], _: &Pose| candidate[0] < 0.15;
    let third = solver
        .inverse_search_validated(&easy_target(), &seed, GENEROUS, &accept_low)
        .unwrap();
    let fourth = solver
        .inverse_search_validated(&easy_target(), &seed, GENEROUS, &accept_low)
        .unwrap();
    assert_eq!(third, fourth);
}

#[test]
fn seed_outside_the_domain_is_rejected() {
    let arm = arm();
    let chain = arm.chain_with_bounds([(-1.0, 1.0), (-PI, PI), (-PI, PI), (-PI, PI)]);
    let solver = RedundantKinematics::new(chain, "j1", STEP, Arc::new(arm)).unwrap();

    let seed = vec![1.5, 0.0, 0.0, 0.0];
    assert_eq!(
        solver.inverse_search(&easy_target(), &seed, GENEROUS),
        Err(IkError::NoSolution)
    );
}

#[test]
fn slice_representative_is_ranked_before_limit_filtering() {
    let arm = arm();
    // Elbow forced positive; the mirror branch is out of bounds.
    let chain = arm.chain_with_bounds([(-PI, PI), (-PI, PI), (0.0, PI), (-PI, PI)]);
    let solver = RedundantKinematics::new(chain, "j1", STEP, Arc::new(arm)).unwrap();

    let compliant = vec![0.3, 0.5, 0.8, -0.2];
    let target = solver.forward(&compliant).unwrap();

    // Seeding at the out-of-bounds mirror branch makes that branch the
    // slice representative (distance zero); the slice then yields nothing
    // even though the compliant branch solves the pose.
    let branches = arm.solve_fixed(&target, 0.3);
    let mirror = branches
        .iter()
        .find(|branch| branch[2] < 0.0)
        .expect("the bent elbow has two branches")
        .clone();
    assert_eq!(solver.inverse(&target, &mirror), Err(IkError::NoSolution));

    // Seeded on the compliant side the same slice succeeds.
    let solution = solver.inverse(&target, &compliant).unwrap();
    assert!((solution[2] - 0.8).abs() < 1e-9);
}

#[test]
fn malformed_seed_degrades_to_no_solution() {
    let solver = solver();
    assert_eq!(
        solver.inverse_search(&easy_target(), &[0.0, 0.0], GENEROUS),
        Err(IkError::NoSolution)
    );
    assert_eq!(
        solver.inverse(&easy_target(), &[0.0, 0.0]),
        Err(IkError::NoSolution)
    );
    // Consistency limits must match the chain dimension as well.
    assert_eq!(
        solver.inverse_search_within(&easy_target(), &[0.0; 4], GENEROUS, &[0.5; 2]),
        Err(IkError::NoSolution)
    );
}
