//! Defines the data types and traits shared by all solver components.

use nalgebra::Isometry3;
use std::fmt;
use std::time::Duration;

/// Pose of a link relative to the chain base. It contains both the Cartesian
/// position and the rotation quaternion and is always a valid rigid
/// transform, never an arbitrary affine map.
pub type Pose = Isometry3<f64>;

/// One angle per actuated joint, radians, in chain order. The length always
/// equals the degrees of freedom of the chain the values belong to.
pub type Joints = Vec<f64>;

/// Branches returned by the analytic solver for one slice, in the solver's
/// own stable order. Typical arms produce up to 8 of these.
pub type Solutions = Vec<Joints>;

/// Caller-supplied acceptance predicate. It receives the candidate joints
/// and the pose the chain reaches at that candidate; returning `false`
/// makes the search continue with the next slice.
pub type SolutionValidator<'a> = dyn Fn(&[f64], &Pose) -> bool + 'a;

/// All joints at the zero position, for a chain with `dof` joints.
pub fn joints_at_zero(dof: usize) -> Joints {
    vec![0.0; dof]
}

/// Closed-form solver for one fixed value of the free joint.
///
/// Fixing the free joint reduces the inverse problem to a finite set of
/// algebraic branches (elbow-up / elbow-down and the like). Implementations
/// must be pure: the same pose and angle always produce the same branches,
/// with no state kept between calls. The search engine calls this once per
/// discretization step.
pub trait SliceSolver: Send + Sync {
    /// Every joint configuration that exactly satisfies `pose` with the
    /// free joint held at `angle`. Empty when the pose is unreachable
    /// there. The free joint entry of each returned configuration equals
    /// `angle`.
    fn solve_fixed(&self, pose: &Pose, angle: f64) -> Solutions;
}

/// Why an inverse kinematics call produced no configuration. Both variants
/// mean "no usable solution now"; `TimedOut` is kept distinguishable so
/// that planning code can retry with a larger budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IkError {
    /// The discretization was exhausted without an acceptable candidate.
    NoSolution,
    /// The wall-clock budget ran out before the discretization was
    /// exhausted.
    TimedOut,
}

impl fmt::Display for IkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IkError::NoSolution => write!(f, "no IK solution"),
            IkError::TimedOut => write!(f, "IK search timed out"),
        }
    }
}

impl std::error::Error for IkError {}

/// Why a forward kinematics call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FkError {
    /// The requested link is not part of the chain.
    UnknownLink(String),
    /// The joint vector does not match the chain's degrees of freedom.
    WrongDimension { expected: usize, found: usize },
}

impl fmt::Display for FkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FkError::UnknownLink(ref link) => write!(f, "link '{}' is not part of the chain", link),
            FkError::WrongDimension { expected, found } => {
                write!(f, "expected {} joint values, got {}", expected, found)
            }
        }
    }
}

impl std::error::Error for FkError {}

/// Inverse and forward kinematics of one serial chain with one redundant
/// joint.
///
/// The four search variants differ only in which optional features are
/// supplied; each behaves like the richest one with consistency limits
/// defaulted to the full free joint domain and the validator defaulted to
/// "accept the first candidate that satisfies the joint bounds".
pub trait Kinematics: Send + Sync {
    /// Solves a single slice at the seed's own free joint value, without
    /// searching the redundancy. Returns the branch closest to the seed if
    /// it satisfies the joint bounds.
    fn inverse(&self, pose: &Pose, seed: &[f64]) -> Result<Joints, IkError>;

    /// Searches the free joint domain outward from the seed until a
    /// candidate satisfies the joint bounds, or the domain is exhausted
    /// (`NoSolution`), or the wall-clock budget runs out (`TimedOut`).
    fn inverse_search(&self, pose: &Pose, seed: &[f64], timeout: Duration)
        -> Result<Joints, IkError>;

    /// Like [`Kinematics::inverse_search`], with the sweep restricted to
    /// `seed ± consistency_limits[free_joint]`. One limit per joint, chain
    /// order; only the free joint's entry constrains the search.
    fn inverse_search_within(
        &self,
        pose: &Pose,
        seed: &[f64],
        timeout: Duration,
        consistency_limits: &[f64],
    ) -> Result<Joints, IkError>;

    /// Like [`Kinematics::inverse_search`], additionally requiring the
    /// caller's predicate to accept the candidate. A rejected candidate
    /// does not end the search; the sweep continues with the next slice.
    fn inverse_search_validated(
        &self,
        pose: &Pose,
        seed: &[f64],
        timeout: Duration,
        validator: &SolutionValidator<'_>,
    ) -> Result<Joints, IkError>;

    /// Consistency limits and validation callback combined; the richest
    /// variant the other three delegate to in spirit.
    fn inverse_search_within_validated(
        &self,
        pose: &Pose,
        seed: &[f64],
        timeout: Duration,
        consistency_limits: &[f64],
        validator: &SolutionValidator<'_>,
    ) -> Result<Joints, IkError>;

    /// Pose of the tip link for the given joint values.
    fn forward(&self, joints: &[f64]) -> Result<Pose, FkError>;

    /// Poses of the named links, in the requested order. Fails the whole
    /// call when any name is not part of the chain.
    fn forward_links(&self, link_names: &[&str], joints: &[f64]) -> Result<Vec<Pose>, FkError>;

    /// Actuated joint names in the order joint vectors are indexed by.
    fn joint_names(&self) -> &[String];

    /// Link names from base to tip, the order established at construction.
    fn link_names(&self) -> &[String];
}
