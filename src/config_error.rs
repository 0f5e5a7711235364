//! Error handling for solver construction and description parsing.

use std::fmt;
use std::io;

/// Unified error to report failures while building a solver from a robot
/// description, a group configuration file, or explicit parameters.
///
/// Construction failures are fatal to the solver object: a solver that
/// could not be built does not exist, so no per-call "is this initialized"
/// check is ever needed.
#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
    WrongAngle(String),
    InvalidLength { expected: usize, found: usize },
    XmlProcessingError(String),
    /// The requested chain could not be traced from base to tip.
    UnreachableGroup { base: String, tip: String },
    /// The configured free joint is not an actuated joint of the chain.
    UnknownJoint(String),
    /// The search discretization angle must be positive and finite.
    BadDiscretization(f64),
    /// The free joint domain is empty or unbounded.
    BadDomain { min: f64, max: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ConfigError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ConfigError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
            ConfigError::WrongAngle(ref msg) =>
                write!(f, "Wrong angle representation: {}", msg),
            ConfigError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ConfigError::XmlProcessingError(ref err) =>
                write!(f, "XML Processing Error: {}", err),
            ConfigError::UnreachableGroup { ref base, ref tip } =>
                write!(f, "No chain from '{}' to '{}' in the description", base, tip),
            ConfigError::UnknownJoint(ref joint) =>
                write!(f, "Joint '{}' is not an actuated joint of the chain", joint),
            ConfigError::BadDiscretization(step) =>
                write!(f, "Search discretization must be positive and finite, got {}", step),
            ConfigError::BadDomain { min, max } =>
                write!(f, "Free joint domain [{}, {}] is unusable", min, max),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl std::error::Error for ConfigError {}
