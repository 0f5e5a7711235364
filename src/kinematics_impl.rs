//! The public solver: a chain, its free joint, and an analytic slice solver.

use crate::chain::Chain;
use crate::config_error::ConfigError;
use crate::kinematic_traits::{
    FkError, IkError, Joints, Kinematics, Pose, SliceSolver, SolutionValidator,
};
use crate::redundancy::Redundancy;
use crate::search::{closest_to_seed, search, SearchRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Inverse and forward kinematics for a serial chain with one redundant
/// joint.
///
/// The chain, the free joint domain and the discretization are fixed at
/// construction; each call keeps its own search state on the stack, so one
/// instance can serve many threads through a shared reference.
pub struct RedundantKinematics {
    chain: Chain,
    redundancy: Redundancy,
    solver: Arc<dyn SliceSolver>,
}

impl RedundantKinematics {
    /// Builds the solver for `chain`, searching over the named free joint
    /// with the given discretization angle, radians. The free joint domain
    /// is its chain bounds. Fails when the joint is not part of the chain
    /// or the discretization is unusable; a solver that cannot be built
    /// cannot be called.
    pub fn new(
        chain: Chain,
        free_joint: &str,
        search_discretization: f64,
        solver: Arc<dyn SliceSolver>,
    ) -> Result<Self, ConfigError> {
        let joint = chain
            .joint_names()
            .iter()
            .position(|name| name == free_joint)
            .ok_or_else(|| ConfigError::UnknownJoint(free_joint.to_string()))?;
        let (min, max) = chain.bounds(joint);
        let redundancy = Redundancy::new(joint, min, max, search_discretization)?;
        Ok(RedundantKinematics {
            chain,
            redundancy,
            solver,
        })
    }

    /// Builds the solver from a URDF robot description and a kinematic
    /// group configuration.
    #[cfg(feature = "allow_filesystem")]
    pub fn from_description(
        urdf_xml: &str,
        group: &crate::config_from_file::Group,
        solver: Arc<dyn SliceSolver>,
    ) -> Result<Self, ConfigError> {
        let chain = crate::urdf::extract_chain(urdf_xml, &group.base_link, &group.tip_link)?;
        Self::new(chain, &group.free_joint, group.search_discretization, solver)
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn redundancy(&self) -> &Redundancy {
        &self.redundancy
    }

    fn request<'a>(
        &self,
        pose: &'a Pose,
        seed: &'a [f64],
        timeout: Duration,
        consistency_limits: Option<&'a [f64]>,
        validator: Option<&'a SolutionValidator<'a>>,
    ) -> SearchRequest<'a> {
        SearchRequest {
            pose,
            seed,
            timeout,
            consistency_limits,
            validator,
        }
    }
}

impl Kinematics for RedundantKinematics {
    fn inverse(&self, pose: &Pose, seed: &[f64]) -> Result<Joints, IkError> {
        if seed.len() != self.chain.dof() {
            warn!(expected = self.chain.dof(), found = seed.len(), "seed dimension mismatch");
            return Err(IkError::NoSolution);
        }
        let branches = self.solver.solve_fixed(pose, seed[self.redundancy.joint]);
        let candidate = closest_to_seed(&branches, seed).ok_or(IkError::NoSolution)?;
        if self.chain.compliant(&candidate) {
            Ok(candidate)
        } else {
            Err(IkError::NoSolution)
        }
    }

    fn inverse_search(
        &self,
        pose: &Pose,
        seed: &[f64],
        timeout: Duration,
    ) -> Result<Joints, IkError> {
        search(
            &self.chain,
            &self.redundancy,
            self.solver.as_ref(),
            &self.request(pose, seed, timeout, None, None),
        )
    }

    fn inverse_search_within(
        &self,
        pose: &Pose,
        seed: &[f64],
        timeout: Duration,
        consistency_limits: &[f64],
    ) -> Result<Joints, IkError> {
        search(
            &self.chain,
            &self.redundancy,
            self.solver.as_ref(),
            &self.request(pose, seed, timeout, Some(consistency_limits), None),
        )
    }

    fn inverse_search_validated(
        &self,
        pose: &Pose,
        seed: &[f64],
        timeout: Duration,
        validator: &SolutionValidator<'_>,
    ) -> Result<Joints, IkError> {
        search(
            &self.chain,
            &self.redundancy,
            self.solver.as_ref(),
            &self.request(pose, seed, timeout, None, Some(validator)),
        )
    }

    fn inverse_search_within_validated(
        &self,
        pose: &Pose,
        seed: &[f64],
        timeout: Duration,
        consistency_limits: &[f64],
        validator: &SolutionValidator<'_>,
    ) -> Result<Joints, IkError> {
        search(
            &self.chain,
            &self.redundancy,
            self.solver.as_ref(),
            &self.request(pose, seed, timeout, Some(consistency_limits), Some(validator)),
        )
    }

    fn forward(&self, joints: &[f64]) -> Result<Pose, FkError> {
        self.chain.pose_of(self.chain.tip_link(), joints)
    }

    fn forward_links(&self, link_names: &[&str], joints: &[f64]) -> Result<Vec<Pose>, FkError> {
        link_names
            .iter()
            .map(|name| self.chain.pose_of(name, joints))
            .collect()
    }

    fn joint_names(&self) -> &[String] {
        self.chain.joint_names()
    }

    fn link_names(&self) -> &[String] {
        self.chain.link_names()
    }
}
