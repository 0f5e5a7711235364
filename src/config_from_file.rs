//! Reads the kinematic group configuration from YAML (optional).

use crate::config_error::ConfigError;
use regex::Regex;
use std::fs::read_to_string;
use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader};

/// One kinematic group: which part of the robot the solver drives and how
/// its free joint is discretized. A file may describe several groups:
///
/// ```yaml
/// right_arm:
///   base_link: torso_lift_link
///   tip_link: r_wrist_roll_link
///   free_joint: r_upper_arm_roll_joint
///   search_discretization: deg(2.0)
///   default_timeout: 0.5
/// ```
///
/// `search_discretization` is radians when given as a plain number; the
/// `deg(angle)` notation is also accepted.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub base_link: String,
    pub tip_link: String,
    pub free_joint: String,
    /// Radians.
    pub search_discretization: f64,
    /// Seconds. Callers may override per call.
    pub default_timeout: Option<f64>,
}

impl Group {
    /// Reads the named group from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P, group_name: &str) -> Result<Self, ConfigError> {
        let contents = read_to_string(path)?;
        Self::from_yaml(&contents, group_name)
    }

    /// Reads the named group from YAML content.
    pub fn from_yaml(contents: &str, group_name: &str) -> Result<Self, ConfigError> {
        let documents = YamlLoader::load_from_str(contents)
            .map_err(|e| ConfigError::ParseError(format!("{}", e)))?;
        let root = documents
            .first()
            .ok_or_else(|| ConfigError::ParseError("empty YAML document".to_string()))?;
        let node = &root[group_name];
        if node.is_badvalue() {
            return Err(ConfigError::MissingField(group_name.to_string()));
        }
        Ok(Group {
            name: group_name.to_string(),
            base_link: required_str(node, "base_link")?,
            tip_link: required_str(node, "tip_link")?,
            free_joint: required_str(node, "free_joint")?,
            search_discretization: required_angle(node, "search_discretization")?,
            default_timeout: optional_number(node, "default_timeout")?,
        })
    }
}

fn required_str(node: &Yaml, field: &str) -> Result<String, ConfigError> {
    node[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingField(field.to_string()))
}

fn number(value: &Yaml) -> Option<f64> {
    value.as_f64().or_else(|| value.as_i64().map(|v| v as f64))
}

fn optional_number(node: &Yaml, field: &str) -> Result<Option<f64>, ConfigError> {
    let value = &node[field];
    if value.is_badvalue() {
        return Ok(None);
    }
    number(value)
        .map(Some)
        .ok_or_else(|| ConfigError::ParseError(format!("{} must be a number", field)))
}

/// Angles come as plain radian numbers or as the `deg(x)` notation.
fn required_angle(node: &Yaml, field: &str) -> Result<f64, ConfigError> {
    let value = &node[field];
    if let Some(radians) = number(value) {
        return Ok(radians);
    }
    if let Some(text) = value.as_str() {
        return parse_deg(text);
    }
    Err(ConfigError::MissingField(field.to_string()))
}

fn parse_deg(text: &str) -> Result<f64, ConfigError> {
    let pattern = Regex::new(r"^deg\(\s*(-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)\s*\)$")
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let captures = pattern
        .captures(text.trim())
        .ok_or_else(|| ConfigError::WrongAngle(text.to_string()))?;
    let degrees: f64 = captures[1]
        .parse()
        .map_err(|_| ConfigError::WrongAngle(text.to_string()))?;
    Ok(degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "
right_arm:
  base_link: torso_lift_link
  tip_link: r_wrist_roll_link
  free_joint: r_upper_arm_roll_joint
  search_discretization: deg(2.0)
  default_timeout: 0.5
left_arm:
  base_link: torso_lift_link
  tip_link: l_wrist_roll_link
  free_joint: l_upper_arm_roll_joint
  search_discretization: 0.02
";

    #[test]
    fn reads_a_group_with_degree_notation() {
        let group = Group::from_yaml(CONFIG, "right_arm").unwrap();
        assert_eq!(group.base_link, "torso_lift_link");
        assert_eq!(group.tip_link, "r_wrist_roll_link");
        assert_eq!(group.free_joint, "r_upper_arm_roll_joint");
        assert!((group.search_discretization - 2.0_f64.to_radians()).abs() < 1e-12);
        assert_eq!(group.default_timeout, Some(0.5));
    }

    #[test]
    fn reads_a_group_with_plain_radians() {
        let group = Group::from_yaml(CONFIG, "left_arm").unwrap();
        assert_eq!(group.search_discretization, 0.02);
        assert_eq!(group.default_timeout, None);
    }

    #[test]
    fn missing_group_is_reported() {
        assert!(matches!(
            Group::from_yaml(CONFIG, "head"),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn missing_field_is_reported() {
        let incomplete = "
arm:
  base_link: base
  tip_link: tool
  search_discretization: 0.1
";
        assert!(matches!(
            Group::from_yaml(incomplete, "arm"),
            Err(ConfigError::MissingField(ref field)) if field == "free_joint"
        ));
    }

    #[test]
    fn malformed_angle_is_reported() {
        let broken = "
arm:
  base_link: base
  tip_link: tool
  free_joint: j1
  search_discretization: rad(0.1)
";
        assert!(matches!(
            Group::from_yaml(broken, "arm"),
            Err(ConfigError::WrongAngle(_))
        ));
    }
}
