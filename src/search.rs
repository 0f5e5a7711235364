//! The redundancy search loop.
//!
//! One search call sweeps the free joint domain outward from the seed,
//! queries the slice solver at each sample, and stops at the first slice
//! whose closest-to-seed branch passes the joint bounds and, when present,
//! the caller's validator. All state lives on this stack frame; the same
//! inputs always visit the same offsets and return the same solution.

use crate::chain::Chain;
use crate::kinematic_traits::{IkError, Joints, Pose, SliceSolver, Solutions, SolutionValidator};
use crate::redundancy::{Redundancy, StepSweep};
use crate::utils::euclidean_distance;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Margin for deciding that a sampled angle drifted past the window edge.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Everything one search call needs. The four public variants differ only
/// in which of the optional fields they populate.
pub(crate) struct SearchRequest<'a> {
    pub pose: &'a Pose,
    pub seed: &'a [f64],
    pub timeout: Duration,
    /// One limit per joint, chain order; only the free joint's entry is
    /// read. `None` leaves the whole domain open.
    pub consistency_limits: Option<&'a [f64]>,
    pub validator: Option<&'a SolutionValidator<'a>>,
}

/// Representative of one slice: the branch closest to the seed in joint
/// space. Chosen before any limit or callback filtering; if it is rejected
/// later, the slice yields nothing.
pub(crate) fn closest_to_seed(branches: &Solutions, seed: &[f64]) -> Option<Joints> {
    branches
        .iter()
        .map(|branch| (euclidean_distance(branch, seed), branch))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, branch)| branch.clone())
}

/// Runs one search to completion. Success returns the accepted
/// configuration; exhaustion and deadline expiry come back as the two
/// distinct error values, never as a panic.
pub(crate) fn search(
    chain: &Chain,
    redundancy: &Redundancy,
    solver: &dyn SliceSolver,
    request: &SearchRequest<'_>,
) -> Result<Joints, IkError> {
    let started = Instant::now();
    let seed = request.seed;
    if seed.len() != chain.dof() {
        warn!(expected = chain.dof(), found = seed.len(), "seed dimension mismatch");
        return Err(IkError::NoSolution);
    }

    let pivot = seed[redundancy.joint];
    if pivot < redundancy.min || pivot > redundancy.max {
        debug!(pivot, "seed free joint value lies outside the declared domain");
        return Err(IkError::NoSolution);
    }

    let consistency = match request.consistency_limits {
        Some(limits) if limits.len() != chain.dof() => {
            warn!(
                expected = chain.dof(),
                found = limits.len(),
                "consistency limits dimension mismatch"
            );
            return Err(IkError::NoSolution);
        }
        Some(limits) => Some(limits[redundancy.joint]),
        None => None,
    };

    let window = redundancy.window(pivot, consistency);
    let (up, down) = redundancy.counts(pivot, window);
    let mut offsets = StepSweep::new(up, down);
    let mut visited = 0u32;

    loop {
        // The deadline is polled once per discretization step, after the
        // step has been tried: a zero budget still examines the seed's own
        // slice before giving up.
        if visited > 0 && started.elapsed() >= request.timeout {
            debug!(visited, "search ran out of time");
            return Err(IkError::TimedOut);
        }
        let Some(offset) = offsets.next() else { break };
        visited += 1;

        let angle = pivot + f64::from(offset) * redundancy.step;
        if angle < window.0 - EDGE_TOLERANCE || angle > window.1 + EDGE_TOLERANCE {
            // Outside the window; the slice solver is not consulted.
            continue;
        }

        let branches = solver.solve_fixed(request.pose, angle);
        if branches.is_empty() {
            trace!(offset, angle, "slice unreachable");
            continue;
        }
        let Some(candidate) = closest_to_seed(&branches, seed) else {
            continue;
        };
        if !chain.compliant(&candidate) {
            trace!(offset, "slice representative violates joint bounds");
            continue;
        }
        if let Some(validator) = request.validator {
            let reached = chain.tip_pose(&candidate);
            if !validator(&candidate, &reached) {
                trace!(offset, "candidate rejected by the caller");
                continue;
            }
        }
        debug!(offset, visited, "solution accepted");
        return Ok(candidate);
    }

    debug!(visited, "discretization exhausted");
    Err(IkError::NoSolution)
}
