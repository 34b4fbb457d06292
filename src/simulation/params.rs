//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - fixed step size `dt` and number of steps,
//! - gravitational constant `G`,
//! - `min_distance`, the separation below which a pair is ignored

use crate::error::ScenarioError;

/// Gravitational constant used by the reference scenarios (m³·kg⁻¹·s⁻²).
pub const G: f64 = 6.674e-11;

/// Separation below which a pairwise contribution is skipped (m).
pub const MIN_DISTANCE: f64 = 1e-10;

pub const SECONDS_PER_DAY: f64 = 86400.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64, // step size (s)
    pub num_steps: usize, // steps per run
    pub G: f64, // gravitational constant
    pub min_distance: f64, // pair skip threshold
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: SECONDS_PER_DAY,
            num_steps: 365,
            G,
            min_distance: MIN_DISTANCE,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        validate_dt(self.dt)?;
        if !self.G.is_finite() || self.G <= 0.0 {
            return Err(ScenarioError::InvalidParameter {
                name: "G",
                value: self.G,
                reason: "must be finite and > 0",
            });
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(ScenarioError::InvalidParameter {
                name: "min_distance",
                value: self.min_distance,
                reason: "must be finite and >= 0",
            });
        }
        Ok(())
    }

    /// Total simulated time covered by one run.
    pub fn duration(&self) -> f64 {
        self.dt * self.num_steps as f64
    }
}

pub(crate) fn validate_dt(dt: f64) -> Result<(), ScenarioError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(ScenarioError::InvalidParameter {
            name: "dt",
            value: dt,
            reason: "must be finite and > 0",
        });
    }
    Ok(())
}
