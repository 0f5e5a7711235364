//! Helper functions

use crate::kinematic_traits::{Joints, Solutions};
use nalgebra::{Isometry3, UnitQuaternion};

/// Euclidean distance between two configurations in joint space. The seed
/// ranking of the search engine is built on this.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Allows to specify joint values in degrees (converts to radians)
pub fn as_radians<const N: usize>(degrees: [i32; N]) -> Joints {
    degrees.iter().map(|&d| f64::from(d).to_radians()).collect()
}

/// Convert joint values in radians to degrees, for printing and asserts.
pub fn to_degrees(angles: &[f64]) -> Vec<f64> {
    angles.iter().map(|q| q.to_degrees()).collect()
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &[f64]) {
    let row = joints
        .iter()
        .map(|q| format!("{:6.2}", q.to_degrees()))
        .collect::<Vec<_>>()
        .join(" ");
    println!("[{}]", row);
}

/// Print joint values for all branches of one slice, in degrees.
#[allow(dead_code)]
pub fn dump_solutions(solutions: &Solutions) {
    if solutions.is_empty() {
        println!("No solutions");
    }
    for branch in solutions {
        dump_joints(branch);
    }
}

pub fn dump_pose(isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let rotation: UnitQuaternion<f64> = isometry.rotation;
    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}
