//! Inverse and forward kinematics for serial manipulators with one
//! redundant joint, searching the redundancy for acceptable solutions.
//!
//! A manipulator with one more joint than its task needs does not have a
//! finite set of inverse solutions: one joint, the free joint, can be
//! chosen at will, and only then does a closed-form solver produce the
//! finitely many algebraic branches that reach the pose. This crate owns
//! the part of the problem that is independent of the arm's algebra: it
//! discretizes the free joint domain, sweeps it outward from the seed
//! configuration (nearby values mean less joint travel, so they are tried
//! first), ranks the branches of every slice by distance to the seed, and
//! returns the first candidate that satisfies the joint bounds and the
//! caller's acceptance callback, all under a wall-clock budget. The
//! chain-specific algebra plugs in through the
//! [`kinematic_traits::SliceSolver`] trait.
//!
//! # Features
//!
//! - Deterministic expanding search order over the redundancy, with
//!   exhaustive sampling of asymmetric domains.
//! - Four search variants: plain, consistency-limited, callback-validated,
//!   and both combined, plus a single-slice solve at the seed's own free
//!   joint value.
//! - Forward kinematics for any link of the chain, with stable joint and
//!   link name ordering for callers that correlate indices.
//! - Exhaustion and deadline expiry reported as distinct error values, so
//!   planning loops can branch without unwinding.
//! - Chain extraction from URDF descriptions and group configuration from
//!   YAML (optional, on by default).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use rs_redundant_kinematics::kinematic_traits::Kinematics;
//! use rs_redundant_kinematics::kinematics_impl::RedundantKinematics;
//! use rs_redundant_kinematics::planar::PlanarArm;
//!
//! let arm = PlanarArm::new([0.5, 0.4, 0.3, 0.1]);
//! let solver = RedundantKinematics::new(
//!     arm.chain(), "j1", 2.0_f64.to_radians(), Arc::new(arm)).unwrap();
//!
//! let reference = vec![0.4, 0.6, -0.8, 0.3];
//! let target = solver.forward(&reference).unwrap();
//! let solution = solver
//!     .inverse_search(&target, &reference, Duration::from_millis(100))
//!     .unwrap();
//! let reached = solver.forward(&solution).unwrap();
//! assert!((reached.translation.vector - target.translation.vector).norm() < 1e-6);
//! ```

pub mod kinematic_traits;

pub mod chain;
pub mod redundancy;
mod search;
pub mod kinematics_impl;

pub mod planar;

pub mod config_error;

#[path = "utils/utils.rs"]
pub mod utils;

#[cfg(feature = "allow_filesystem")]
pub mod urdf;

#[cfg(feature = "allow_filesystem")]
pub mod config_from_file;

#[cfg(test)]
mod tests;
