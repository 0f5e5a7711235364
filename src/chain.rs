//! Serial chain description and forward kinematics.
//!
//! A [`Chain`] is the immutable picture of the robot the solver works with:
//! the ordered actuated joints between a base link and a tip link, their
//! rotation axes, static origin transforms and position bounds, plus the
//! link names callers use to request poses. It is built once, either
//! programmatically through [`Chain::serial`] or from a robot description
//! (see the `urdf` module), and never changes afterwards.

use crate::kinematic_traits::{FkError, Pose};
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

/// One actuated revolute joint of the chain.
#[derive(Debug, Clone)]
pub struct JointModel {
    /// Joint name, unique within the chain.
    pub name: String,

    /// Static transform from the parent link frame to this joint frame.
    /// Fixed segments preceding the joint are folded in here.
    pub origin: Isometry3<f64>,

    /// Rotation axis in the joint frame.
    pub axis: Unit<Vector3<f64>>,

    /// Lower and upper position bounds, radians. Continuous joints carry
    /// (-PI, PI).
    pub bounds: (f64, f64),

    /// Name of the child link this joint moves.
    pub child_link: String,
}

/// An ordered serial chain from a base link to a tip link.
#[derive(Debug, Clone)]
pub struct Chain {
    base_link: String,
    joints: Vec<JointModel>,
    /// Fixed transform from the last child link to the tip frame, identity
    /// when the tip is the last child link itself.
    tip_offset: Isometry3<f64>,
    tip_link: String,
    joint_names: Vec<String>,
    link_names: Vec<String>,
}

impl Chain {
    /// Builds a chain from explicit joint models. All poses are reported in
    /// the `base_link` frame. `tip_link` and `tip_offset` describe a fixed
    /// flange after the last joint; pass the last child link and the
    /// identity when there is none.
    pub fn serial(
        base_link: &str,
        joints: Vec<JointModel>,
        tip_link: &str,
        tip_offset: Isometry3<f64>,
    ) -> Self {
        debug_assert!(!joints.is_empty(), "a chain needs at least one joint");
        let joint_names = joints.iter().map(|j| j.name.clone()).collect();
        let mut link_names: Vec<String> = Vec::with_capacity(joints.len() + 2);
        link_names.push(base_link.to_string());
        link_names.extend(joints.iter().map(|j| j.child_link.clone()));
        if link_names.last().map(String::as_str) != Some(tip_link) {
            link_names.push(tip_link.to_string());
        }
        Chain {
            base_link: base_link.to_string(),
            joints,
            tip_offset,
            tip_link: tip_link.to_string(),
            joint_names,
            link_names,
        }
    }

    /// Actuated degrees of freedom.
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    /// Joint names in the order joint vectors are indexed by.
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    /// Link names from base to tip.
    pub fn link_names(&self) -> &[String] {
        &self.link_names
    }

    pub fn base_link(&self) -> &str {
        &self.base_link
    }

    pub fn tip_link(&self) -> &str {
        &self.tip_link
    }

    /// The joint definitions, chain order.
    pub fn joints(&self) -> &[JointModel] {
        &self.joints
    }

    /// Position bounds of one joint, radians.
    pub fn bounds(&self, joint: usize) -> (f64, f64) {
        self.joints[joint].bounds
    }

    /// True when every joint value lies within its declared bounds.
    pub fn compliant(&self, angles: &[f64]) -> bool {
        angles.len() == self.joints.len()
            && self
                .joints
                .iter()
                .zip(angles)
                .all(|(joint, &q)| q >= joint.bounds.0 && q <= joint.bounds.1)
    }

    /// Pose of a named link in the base frame.
    pub fn pose_of(&self, link: &str, angles: &[f64]) -> Result<Pose, FkError> {
        if angles.len() != self.joints.len() {
            return Err(FkError::WrongDimension {
                expected: self.joints.len(),
                found: angles.len(),
            });
        }
        if link == self.base_link {
            return Ok(Isometry3::identity());
        }
        let mut transform = Isometry3::identity();
        for (joint, &q) in self.joints.iter().zip(angles) {
            transform *= joint.origin * rotation_about(&joint.axis, q);
            if joint.child_link == link {
                return Ok(transform);
            }
        }
        if link == self.tip_link {
            return Ok(transform * self.tip_offset);
        }
        Err(FkError::UnknownLink(link.to_string()))
    }

    /// Pose of the tip frame. The caller guarantees the dimension; the
    /// search engine uses this after the slice solver already produced a
    /// configuration of the right length.
    pub(crate) fn tip_pose(&self, angles: &[f64]) -> Pose {
        debug_assert_eq!(angles.len(), self.joints.len());
        let mut transform = Isometry3::identity();
        for (joint, &q) in self.joints.iter().zip(angles) {
            transform *= joint.origin * rotation_about(&joint.axis, q);
        }
        transform * self.tip_offset
    }
}

fn rotation_about(axis: &Unit<Vector3<f64>>, angle: f64) -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::identity(),
        UnitQuaternion::from_axis_angle(axis, angle),
    )
}
