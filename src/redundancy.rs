//! Discretization of the free joint domain and the order it is searched in.

use crate::config_error::ConfigError;

/// Identifies the free joint and how its domain is discretized.
///
/// Built once during solver construction from the chain bounds of the free
/// joint and the configured discretization angle; immutable afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Redundancy {
    /// Index of the free joint in chain order.
    pub joint: usize,

    /// Lower edge of the free joint domain, radians.
    pub min: f64,

    /// Upper edge of the free joint domain, radians.
    pub max: f64,

    /// Search discretization angle, radians.
    pub step: f64,
}

impl Redundancy {
    pub fn new(joint: usize, min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::BadDiscretization(step));
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::BadDomain { min, max });
        }
        Ok(Redundancy { joint, min, max, step })
    }

    /// Total number of whole discretization steps the domain holds.
    pub fn steps(&self) -> usize {
        ((self.max - self.min) / self.step).floor() as usize
    }

    /// The window actually swept around `pivot`: the declared domain,
    /// intersected with the consistency limit when one is given.
    pub(crate) fn window(&self, pivot: f64, consistency: Option<f64>) -> (f64, f64) {
        match consistency {
            Some(limit) => (self.min.max(pivot - limit), self.max.min(pivot + limit)),
            None => (self.min, self.max),
        }
    }

    /// Whole steps between `pivot` and the upper / lower window edge.
    pub(crate) fn counts(&self, pivot: f64, window: (f64, f64)) -> (i32, i32) {
        let up = ((window.1 - pivot) / self.step).floor() as i32;
        let down = ((pivot - window.0) / self.step).floor() as i32;
        (up, down)
    }
}

/// Expanding sweep over step offsets: 0, +1, -1, +2, -2, ... bounded by
/// `up` steps above the pivot and `down` steps below it.
///
/// Solutions near the seed's own free value mean less joint travel, so
/// offsets are visited breadth-first outward from 0. Once one side of an
/// asymmetric window is exhausted the sweep keeps stepping on the side
/// that is still open until its own bound is reached.
pub(crate) struct StepSweep {
    count: i32,
    max_count: i32,
    min_count: i32,
    started: bool,
}

impl StepSweep {
    pub(crate) fn new(up: i32, down: i32) -> Self {
        StepSweep {
            count: 0,
            max_count: up,
            min_count: -down,
            started: false,
        }
    }
}

impl Iterator for StepSweep {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if !self.started {
            self.started = true;
            return Some(0);
        }
        let next = if self.count > 0 {
            if -self.count >= self.min_count {
                -self.count
            } else if self.count + 1 <= self.max_count {
                self.count + 1
            } else {
                return None;
            }
        } else if 1 - self.count <= self.max_count {
            1 - self.count
        } else if self.count - 1 >= self.min_count {
            self.count - 1
        } else {
            return None;
        };
        self.count = next;
        Some(next)
    }
}
