//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator and intra-step update policy
//! - [`ParametersConfig`] – step size, step count and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The Sun–Earth scenario shipped under `scenarios/`:
//!
//! ```yaml
//! engine:
//!   integrator: "leapfrog"      # or "euler_cromer"
//!   update_policy: "snapshot"   # or "sequential"
//!
//! parameters:
//!   dt: 86400.0                 # one day per step
//!   num_steps: 365
//!   G: 6.674e-11                # optional
//!   min_distance: 1.0e-10       # optional, pair skip threshold
//!
//! bodies:
//!   - name: "Sun"
//!     m: 1.989e30
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!   - name: "Earth"
//!     m: 5.972e24
//!     x: [1.496e11, 0.0, 0.0]
//!     v: [0.0, 29783.0, 0.0]
//! ```
//!
//! [`Scenario`](crate::Scenario) turns this into validated runtime types.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::ScenarioError;
use crate::simulation::engine::UpdatePolicy;
use crate::simulation::integrator::IntegratorKind;
use crate::simulation::params::{G, MIN_DISTANCE};

/// Engine-level configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorKind, // time integrator, leapfrog unless set
    #[serde(default)]
    pub update_policy: UpdatePolicy, // which neighbour positions a body sees mid-step
}

/// Numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64, // time step (s)
    pub num_steps: usize, // number of steps
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_min_distance")]
    pub min_distance: f64, // pairs closer than this are ignored
}

fn default_g() -> f64 {
    G
}

fn default_min_distance() -> f64 {
    MIN_DISTANCE
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // label, unique within the scenario
    pub m: f64, // mass (kg)
    pub x: Vec<f64>, // initial position (m), three components
    pub v: Vec<f64>, // initial velocity (m/s), three components
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
parameters:
  dt: 3600.0
  num_steps: 24
bodies:
  - name: "Sun"
    m: 1.989e30
    x: [0.0, 0.0, 0.0]
    v: [0.0, 0.0, 0.0]
"#;

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = ScenarioConfig::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(cfg.engine.integrator, IntegratorKind::Leapfrog);
        assert_eq!(cfg.engine.update_policy, UpdatePolicy::Snapshot);
        assert_eq!(cfg.parameters.G, G);
        assert_eq!(cfg.parameters.min_distance, MIN_DISTANCE);
        assert_eq!(cfg.parameters.num_steps, 24);
        assert_eq!(cfg.bodies.len(), 1);
    }

    #[test]
    fn parses_engine_choices() {
        let yaml = format!(
            "engine:\n  integrator: \"euler_cromer\"\n  update_policy: \"sequential\"\n{MINIMAL}"
        );
        let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(cfg.engine.integrator, IntegratorKind::SemiImplicitEuler);
        assert_eq!(cfg.engine.update_policy, UpdatePolicy::Sequential);

        let yaml = format!("engine:\n  integrator: \"semi_implicit_euler\"\n{MINIMAL}");
        let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(cfg.engine.integrator, IntegratorKind::SemiImplicitEuler);
    }

    #[test]
    fn unknown_integrator_is_a_yaml_error() {
        let yaml = format!("engine:\n  integrator: \"rk4\"\n{MINIMAL}");
        let err = ScenarioConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ScenarioError::Yaml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ScenarioConfig::from_path("does/not/exist.yaml").unwrap_err();
        match err {
            ScenarioError::Io { path, .. } => assert!(path.ends_with("exist.yaml")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
