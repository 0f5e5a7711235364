//! Builds a chain description from URDF (optional).
//!
//! Only the joint graph of the description is read: the chain between the
//! requested base and tip links is traced parent to child, fixed joints
//! are folded into the origin of the next actuated joint (or into the tip
//! offset when they trail the chain), and continuous joints receive
//! (-PI, PI) bounds. Link geometry, inertia and materials are ignored.

use crate::chain::{Chain, JointModel};
use crate::config_error::ConfigError;
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};
use std::f64::consts::PI;
use std::fs::read_to_string;
use std::path::Path;
use sxd_document::{dom, parser};
use tracing::debug;

/// One `<joint>` element as it appears in the description.
#[derive(Debug)]
struct RawJoint {
    name: String,
    kind: String,
    parent: String,
    child: String,
    origin: Isometry3<f64>,
    axis: Vector3<f64>,
    limits: Option<(f64, f64)>,
}

/// Reads the robot description from a URDF file and extracts the chain
/// between the two named links.
pub fn extract_chain_from_file<P: AsRef<Path>>(
    path: P,
    base_link: &str,
    tip_link: &str,
) -> Result<Chain, ConfigError> {
    let xml = read_to_string(path)?;
    extract_chain(&xml, base_link, tip_link)
}

/// Extracts the serial chain between `base_link` and `tip_link` from URDF
/// XML content. Fails with `UnreachableGroup` when no parent-to-child walk
/// connects the two links.
pub fn extract_chain(xml: &str, base_link: &str, tip_link: &str) -> Result<Chain, ConfigError> {
    let package = parser::parse(xml)
        .map_err(|e| ConfigError::XmlProcessingError(format!("{:?}", e)))?;
    let document = package.as_document();
    let joints = collect_joints(&document)?;
    debug!(joints = joints.len(), "description parsed");

    let path = find_path(&joints, base_link, tip_link).ok_or_else(|| {
        ConfigError::UnreachableGroup {
            base: base_link.to_string(),
            tip: tip_link.to_string(),
        }
    })?;

    let mut models = Vec::new();
    let mut folded = Isometry3::identity();
    for raw in &path {
        match raw.kind.as_str() {
            "revolute" | "continuous" => {
                let bounds = match raw.limits {
                    Some(limits) => limits,
                    None => (-PI, PI),
                };
                models.push(JointModel {
                    name: raw.name.clone(),
                    origin: folded * raw.origin,
                    axis: Unit::new_normalize(raw.axis),
                    bounds,
                    child_link: raw.child.clone(),
                });
                folded = Isometry3::identity();
            }
            "fixed" => {
                folded *= raw.origin;
            }
            other => {
                return Err(ConfigError::ParseError(format!(
                    "joint '{}' has unsupported type '{}'",
                    raw.name, other
                )));
            }
        }
    }
    if models.is_empty() {
        return Err(ConfigError::ParseError(format!(
            "chain from '{}' to '{}' has no actuated joints",
            base_link, tip_link
        )));
    }
    Ok(Chain::serial(base_link, models, tip_link, folded))
}

/// Ordered walk of `<joint>` elements from `from` to `to`, depth first in
/// document order, so the result is deterministic for branching trees.
fn find_path<'a>(joints: &'a [RawJoint], from: &str, to: &str) -> Option<Vec<&'a RawJoint>> {
    if from == to {
        return Some(Vec::new());
    }
    for joint in joints.iter().filter(|j| j.parent == from) {
        if let Some(mut rest) = find_path(joints, &joint.child, to) {
            rest.insert(0, joint);
            return Some(rest);
        }
    }
    None
}

fn collect_joints(document: &dom::Document) -> Result<Vec<RawJoint>, ConfigError> {
    let robot = document
        .root()
        .children()
        .into_iter()
        .find_map(|child| match child {
            dom::ChildOfRoot::Element(e) if e.name().local_part() == "robot" => Some(e),
            _ => None,
        })
        .ok_or_else(|| ConfigError::MissingField("robot".to_string()))?;

    let mut joints = Vec::new();
    for element in child_elements(robot) {
        if element.name().local_part() != "joint" {
            continue;
        }
        joints.push(read_joint(element)?);
    }
    Ok(joints)
}

fn read_joint(joint: dom::Element) -> Result<RawJoint, ConfigError> {
    let name = required_attribute(joint, "name")?;
    let kind = required_attribute(joint, "type")?;

    let mut parent = None;
    let mut child = None;
    let mut origin = Isometry3::identity();
    // URDF's default axis when the element is absent.
    let mut axis = Vector3::x();
    let mut limits = None;

    for element in child_elements(joint) {
        match element.name().local_part() {
            "parent" => parent = Some(required_attribute(element, "link")?),
            "child" => child = Some(required_attribute(element, "link")?),
            "origin" => origin = read_origin(element)?,
            "axis" => {
                let xyz = parse_triple(&required_attribute(element, "xyz")?)?;
                axis = Vector3::new(xyz[0], xyz[1], xyz[2]);
            }
            "limit" => {
                let lower = numeric_attribute(element, "lower")?;
                let upper = numeric_attribute(element, "upper")?;
                if let (Some(lower), Some(upper)) = (lower, upper) {
                    limits = Some((lower, upper));
                }
            }
            _ => {}
        }
    }

    Ok(RawJoint {
        parent: parent.ok_or_else(|| ConfigError::MissingField(format!("{}/parent", name)))?,
        child: child.ok_or_else(|| ConfigError::MissingField(format!("{}/child", name)))?,
        name,
        kind,
        origin,
        axis,
        limits,
    })
}

fn read_origin(element: dom::Element) -> Result<Isometry3<f64>, ConfigError> {
    let xyz = match element.attribute("xyz") {
        Some(attribute) => parse_triple(attribute.value())?,
        None => [0.0; 3],
    };
    let rpy = match element.attribute("rpy") {
        Some(attribute) => parse_triple(attribute.value())?,
        None => [0.0; 3],
    };
    Ok(Isometry3::from_parts(
        Translation3::new(xyz[0], xyz[1], xyz[2]),
        UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]),
    ))
}

fn child_elements(element: dom::Element) -> Vec<dom::Element> {
    element
        .children()
        .into_iter()
        .filter_map(|child| match child {
            dom::ChildOfElement::Element(e) => Some(e),
            _ => None,
        })
        .collect()
}

fn required_attribute(element: dom::Element, name: &str) -> Result<String, ConfigError> {
    element
        .attribute(name)
        .map(|attribute| attribute.value().to_string())
        .ok_or_else(|| {
            ConfigError::MissingField(format!("{}/{}", element.name().local_part(), name))
        })
}

fn numeric_attribute(element: dom::Element, name: &str) -> Result<Option<f64>, ConfigError> {
    match element.attribute(name) {
        None => Ok(None),
        Some(attribute) => attribute
            .value()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", name, e))),
    }
}

/// Parses a whitespace separated `x y z` triple.
fn parse_triple(text: &str) -> Result<[f64; 3], ConfigError> {
    let values: Vec<f64> = text
        .split_whitespace()
        .map(|token| token.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| ConfigError::ParseError(format!("'{}': {}", text, e)))?;
    if values.len() != 3 {
        return Err(ConfigError::InvalidLength {
            expected: 3,
            found: values.len(),
        });
    }
    Ok([values[0], values[1], values[2]])
}
