//! Reference analytic solver: a planar arm with four revolute joints.
//!
//! Four Z-axis joints moving in the XY plane give the three-dimensional
//! planar task (position plus yaw) one redundant degree of freedom, with
//! the first joint playing the free-joint role. Fixing that joint leaves a
//! closed-form two-branch elbow problem, which makes this arm a convenient
//! stand-in for chain-specific solvers: the usage demo and most of the
//! test suite run on it, and a real arm's solver plugs into the same
//! [`SliceSolver`] seam.

use crate::chain::{Chain, JointModel};
use crate::kinematic_traits::{Pose, SliceSolver, Solutions};
use nalgebra::{Isometry3, Vector3};
use std::f64::consts::PI;

/// How far the target may leave the XY plane, or its rotation may leave
/// pure yaw, before a slice is declared unreachable.
const PLANE_TOLERANCE: f64 = 1e-9;

/// Slack on the elbow reach check, absorbing round-off at the boundary of
/// the reachable annulus.
const REACH_TOLERANCE: f64 = 1e-9;

/// Below this elbow angle the two branches are one straight-arm solution.
/// acos turns round-off of the cosine near 1 into angles of about 1e-7,
/// so this must stay well above that.
const STRAIGHT_TOLERANCE: f64 = 1e-6;

/// Planar 4R arm with the given link lengths, meters, base to tool plate.
#[derive(Debug, Clone, Copy)]
pub struct PlanarArm {
    pub lengths: [f64; 4],
}

impl PlanarArm {
    pub fn new(lengths: [f64; 4]) -> Self {
        PlanarArm { lengths }
    }

    /// Chain description matching this arm's geometry: joints j1..j4 about
    /// Z, links along X, a fixed tool plate after the last joint. All
    /// joints get the full (-PI, PI) range.
    pub fn chain(&self) -> Chain {
        self.chain_with_bounds([(-PI, PI); 4])
    }

    /// Same geometry with explicit per-joint bounds, for callers that need
    /// a restricted arm.
    pub fn chain_with_bounds(&self, bounds: [(f64, f64); 4]) -> Chain {
        let mut joints = Vec::with_capacity(4);
        let mut offset = 0.0;
        for (i, &limits) in bounds.iter().enumerate() {
            joints.push(JointModel {
                name: format!("j{}", i + 1),
                origin: Isometry3::translation(offset, 0.0, 0.0),
                axis: Vector3::z_axis(),
                bounds: limits,
                child_link: format!("link{}", i + 1),
            });
            offset = self.lengths[i];
        }
        Chain::serial(
            "base",
            joints,
            "tool",
            Isometry3::translation(self.lengths[3], 0.0, 0.0),
        )
    }
}

impl SliceSolver for PlanarArm {
    fn solve_fixed(&self, pose: &Pose, angle: f64) -> Solutions {
        let Some((x, y, yaw)) = planar_pose(pose) else {
            return Vec::new();
        };
        let [l1, l2, l3, l4] = self.lengths;

        // Wrist is where joint 4 must sit; the elbow subchain starts at
        // joint 2, placed by the fixed free joint.
        let wrist_x = x - l4 * yaw.cos();
        let wrist_y = y - l4 * yaw.sin();
        let root_x = l1 * angle.cos();
        let root_y = l1 * angle.sin();

        let dx = wrist_x - root_x;
        let dy = wrist_y - root_y;
        let reach = (dx * dx + dy * dy).sqrt();
        if reach > l2 + l3 + REACH_TOLERANCE || reach < (l2 - l3).abs() - REACH_TOLERANCE {
            return Vec::new();
        }

        let cos_bend = ((reach * reach - l2 * l2 - l3 * l3) / (2.0 * l2 * l3)).clamp(-1.0, 1.0);
        let bend = cos_bend.acos();
        let heading = dy.atan2(dx);

        let mut solutions = Vec::with_capacity(2);
        for elbow in [bend, -bend] {
            let shoulder = heading - (l3 * elbow.sin()).atan2(l2 + l3 * elbow.cos());
            let q2 = normalize(shoulder - angle);
            let q3 = normalize(elbow);
            let q4 = normalize(yaw - (angle + q2 + q3));
            solutions.push(vec![angle, q2, q3, q4]);
            if bend.abs() < STRAIGHT_TOLERANCE {
                // A straight arm has a single branch.
                break;
            }
        }
        solutions
    }
}

/// Projects a spatial pose onto the arm plane. `Some((x, y, yaw))` when the
/// pose is a pure-yaw transform in the XY plane, `None` otherwise.
fn planar_pose(pose: &Pose) -> Option<(f64, f64, f64)> {
    let translation = pose.translation.vector;
    if translation.z.abs() > PLANE_TOLERANCE {
        return None;
    }
    let lifted = pose.rotation * Vector3::z();
    if (lifted - Vector3::z()).norm() > PLANE_TOLERANCE {
        return None;
    }
    let heading = pose.rotation * Vector3::x();
    Some((translation.x, translation.y, heading.y.atan2(heading.x)))
}

/// Wraps an angle into (-PI, PI].
fn normalize(angle: f64) -> f64 {
    let mut wrapped = angle % (2.0 * PI);
    if wrapped > PI {
        wrapped -= 2.0 * PI;
    } else if wrapped < -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}
