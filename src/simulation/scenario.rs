//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - the driver (`Engine`) with the chosen integrator and update policy
//! - numerical parameters (`Parameters`)
//! - the body set at t = 0
//!
//! Scenario data (planet tables, passing stars) lives in YAML files only.

use log::debug;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::ScenarioError;
use crate::simulation::diagnostics::{relative_drift, total_energy};
use crate::simulation::engine::{Engine, UpdatePolicy};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::IntegratorKind;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodySet};

/// Engine, parameters and bodies built together
///
/// The engine captures the integrator, the policy and the gravity settings
/// when the scenario is built, so those are read-only afterwards. Only the
/// step count can change between runs.
pub struct Scenario {
    integrator: IntegratorKind,
    policy: UpdatePolicy,
    parameters: Parameters,
    pub bodies: BodySet,
    engine: Engine,
}

/// What a completed run reports back
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize, // steps taken by this run
    pub t: f64, // simulated time at the end of the run
    pub initial_energy: f64, // total energy before the run
    pub final_energy: f64, // total energy after the run
}

impl RunSummary {
    pub fn energy_drift(&self) -> f64 {
        relative_drift(self.initial_energy, self.final_energy)
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            num_steps: p_cfg.num_steps,
            G: p_cfg.G,
            min_distance: p_cfg.min_distance,
        };
        parameters.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body`, validating each
        let bodies = cfg
            .bodies
            .iter()
            .map(|bc: &BodyConfig| Body::from_slices(bc.name.as_str(), bc.m, &bc.x, &bc.v))
            .collect::<Result<Vec<_>, _>>()?;
        let bodies = BodySet::new(bodies)?;

        debug!(
            "built scenario with {} bodies, {} steps of {} s",
            bodies.len(),
            parameters.num_steps,
            parameters.dt
        );

        Ok(Self::new(bodies, parameters, cfg.engine.integrator, cfg.engine.update_policy))
    }

    /// Assemble a scenario from already-built bodies
    pub fn new(
        bodies: BodySet,
        parameters: Parameters,
        integrator: IntegratorKind,
        policy: UpdatePolicy,
    ) -> Self {
        let gravity = NewtonianGravity::new(parameters.G, parameters.min_distance);
        Self {
            integrator,
            policy,
            engine: Engine::with_gravity(integrator, gravity, policy),
            parameters,
            bodies,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn integrator(&self) -> IntegratorKind {
        self.integrator
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Steps taken by the next [`Scenario::run`]
    pub fn set_num_steps(&mut self, num_steps: usize) {
        self.parameters.num_steps = num_steps;
    }

    pub fn total_energy(&self) -> f64 {
        total_energy(&self.bodies, self.parameters.G, self.parameters.min_distance)
    }

    /// Run `parameters.num_steps` steps of `parameters.dt`
    pub fn run(&mut self) -> Result<RunSummary, ScenarioError> {
        self.parameters.validate()?;
        let initial_energy = self.total_energy();
        let steps_before = self.bodies.steps();

        self.engine
            .run(&mut self.bodies, self.parameters.num_steps, self.parameters.dt)?;

        Ok(RunSummary {
            steps: self.bodies.steps() - steps_before,
            t: self.bodies.t(),
            initial_energy,
            final_energy: self.total_energy(),
        })
    }
}
