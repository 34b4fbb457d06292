//! Simulation driver
//!
//! Applies the selected integrator to every body, in set order, for a fixed
//! number of steps. [`UpdatePolicy`] decides which neighbour positions a body
//! sees while it is being advanced.

use log::debug;
use serde::Deserialize;

use crate::error::ScenarioError;
use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::integrator::{Integrator, IntegratorKind};
use crate::simulation::params::validate_dt;
use crate::simulation::states::{BodySet, PointMass};

/// Which neighbour state a body is integrated against within one step
/// `update_policy: "snapshot"` or `update_policy: "sequential"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Every body sees the positions all bodies held at the start of the step.
    /// Two-stage integrators then close the step against the positions all
    /// bodies reached. Results do not depend on body order.
    #[default]
    #[serde(rename = "snapshot")]
    Snapshot,

    /// Every body sees the live set: neighbours earlier in the order are
    /// already at their new position.
    #[serde(rename = "sequential")]
    Sequential,
}

pub struct Engine {
    integrator: Box<dyn Integrator>,
    forces: Box<dyn Acceleration>,
    policy: UpdatePolicy,
}

impl Engine {
    pub fn new(
        integrator: Box<dyn Integrator>,
        forces: Box<dyn Acceleration>,
        policy: UpdatePolicy,
    ) -> Self {
        Self {
            integrator,
            forces,
            policy,
        }
    }

    /// Newtonian gravity with the given integrator and policy
    pub fn with_gravity(kind: IntegratorKind, gravity: NewtonianGravity, policy: UpdatePolicy) -> Self {
        Self::new(kind.build(), Box::new(gravity), policy)
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    /// Advance every body in `set` by one step of `dt`
    pub fn step(&self, set: &mut BodySet, dt: f64) -> Result<(), ScenarioError> {
        validate_dt(dt)?;
        let mut others = Vec::with_capacity(set.len().saturating_sub(1));
        self.step_unchecked(set, dt, &mut others);
        Ok(())
    }

    /// Advance every body in `set` by exactly `num_steps` steps of `dt`
    pub fn run(&self, set: &mut BodySet, num_steps: usize, dt: f64) -> Result<(), ScenarioError> {
        validate_dt(dt)?;
        debug!(
            "running {} bodies for {num_steps} steps (dt = {dt} s, {}, {:?})",
            set.len(),
            self.integrator.name(),
            self.policy
        );

        // Scratch buffer for the `others` view, reused across bodies and steps
        let mut others = Vec::with_capacity(set.len().saturating_sub(1));
        for _ in 0..num_steps {
            self.step_unchecked(set, dt, &mut others);
        }

        debug!("run finished at t = {} s after {} steps", set.t(), set.steps());
        Ok(())
    }

    fn step_unchecked(&self, set: &mut BodySet, dt: f64, others: &mut Vec<PointMass>) {
        let forces = self.forces.as_ref();

        match self.policy {
            UpdatePolicy::Snapshot => {
                // Every body kicks and drifts against start-of-step positions
                let start = set.snapshot();
                for (i, body) in set.bodies_mut().iter_mut().enumerate() {
                    fill_others(others, &start, i);
                    self.integrator.kick_drift(body, &others[..], dt, forces);
                }

                // Barrier: closing kicks see every neighbour already drifted
                if self.integrator.has_closing_kick() {
                    let drifted = set.snapshot();
                    for (i, body) in set.bodies_mut().iter_mut().enumerate() {
                        fill_others(others, &drifted, i);
                        self.integrator.kick(body, &others[..], dt, forces);
                    }
                }
            }
            UpdatePolicy::Sequential => {
                // live positions, bodies 0..i already advanced
                for i in 0..set.len() {
                    others.clear();
                    others.extend(
                        set.bodies()
                            .iter()
                            .enumerate()
                            .filter(|&(j, _)| j != i)
                            .map(|(_, b)| b.point_mass()),
                    );

                    let body = &mut set.bodies_mut()[i];
                    self.integrator.step(body, &others[..], dt, forces);
                }
            }
        }

        set.advance_clock(dt);
    }
}

/// Every point except the one at `skip`
fn fill_others(others: &mut Vec<PointMass>, points: &[PointMass], skip: usize) {
    others.clear();
    others.extend(
        points
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != skip)
            .map(|(_, p)| *p),
    );
}
