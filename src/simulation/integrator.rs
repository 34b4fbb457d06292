//! Fixed-step time integrators for a single body
//!
//! A step is split in two stages so the driver can put a barrier between
//! them: [`Integrator::kick_drift`] reads neighbours at the start of the
//! step and leaves the body at its end-of-step position, then
//! [`Integrator::kick`] reads neighbours at their end-of-step positions.
//! [`Integrator::step`] runs both stages against one neighbour view.
//!
//! - [`SemiImplicitEuler`]: Euler-Cromer, velocity first then position
//!   with the updated velocity. First order, single stage.
//! - [`Leapfrog`]: kick-drift-kick carrying a half-step velocity between
//!   calls. Second order and symplectic.

use clap::ValueEnum;
use serde::{Deserialize, Deserializer};

use super::forces::Acceleration;
use super::states::{Body, PointMass};

/// Two-stage step contract shared by every integrator
pub trait Integrator {
    /// Everything that reads start-of-step neighbours, ending with the drift
    /// to the new position, which is appended to the trajectory
    fn kick_drift(&self, body: &mut Body, others: &[PointMass], dt: f64, forces: &dyn Acceleration);

    /// Closing kick against the neighbours' end-of-step positions
    fn kick(&self, _body: &mut Body, _others: &[PointMass], _dt: f64, _forces: &dyn Acceleration) {}

    /// Whether [`Integrator::kick`] does any work
    fn has_closing_kick(&self) -> bool {
        false
    }

    /// Advance `body` by `dt`, reading neighbours from `others` for both stages
    fn step(&self, body: &mut Body, others: &[PointMass], dt: f64, forces: &dyn Acceleration) {
        self.kick_drift(body, others, dt, forces);
        self.kick(body, others, dt, forces);
    }

    fn name(&self) -> &'static str;
}

/// Semi-implicit Euler (Euler-Cromer)
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn kick_drift(&self, body: &mut Body, others: &[PointMass], dt: f64, forces: &dyn Acceleration) {
        // a_n from x_n
        let a = forces.acceleration(body, others);

        // v_n+1 = v_n + dt * a_n
        body.v += dt * a;

        // x_n+1 = x_n + dt * v_n+1 (already updated velocity)
        body.x += dt * body.v;

        body.record_position();
    }

    fn name(&self) -> &'static str {
        "euler_cromer"
    }
}

/// Kick-drift-kick leapfrog
///
/// The body's half-step velocity persists across calls. Position always
/// lags that velocity by half a step; `body.v` is resynchronised to the
/// full step by the closing kick but never drives the next drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct Leapfrog;

impl Integrator for Leapfrog {
    fn kick_drift(&self, body: &mut Body, others: &[PointMass], dt: f64, forces: &dyn Acceleration) {
        // Warm-up on the first call, from the state before any drift:
        // v_1/2 = v_0 + (dt/2) * a_0
        let v_half = match body.half_step_velocity() {
            Some(v_half) => v_half,
            None => {
                let a0 = forces.acceleration(body, others);
                body.v + 0.5 * dt * a0
            }
        };

        // Drift: x_n+1 = x_n + dt * v_n+1/2
        body.x += dt * v_half;
        body.set_half_step_velocity(v_half);

        body.record_position();
    }

    fn kick(&self, body: &mut Body, others: &[PointMass], dt: f64, forces: &dyn Acceleration) {
        let half_dt = 0.5 * dt;
        let v_half = body.half_step_velocity().unwrap_or(body.v);

        // a_n+1 at the new position
        let a_full = forces.acceleration(body, others);

        // Synchronised velocity: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
        body.v = v_half + half_dt * a_full;

        // Next half step: v_n+3/2 = v_n+1/2 + dt * a_n+1
        body.set_half_step_velocity(v_half + dt * a_full);
    }

    fn has_closing_kick(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "leapfrog"
    }
}

/// Which integrator a scenario uses
/// `integrator: "leapfrog"` or `integrator: "euler_cromer"`
///
/// The value names below serve both the command line and the YAML loader.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorKind {
    #[default]
    #[value(name = "leapfrog")] // symplectic, bounded long-term energy error
    Leapfrog,

    #[value(name = "euler_cromer", alias = "semi_implicit_euler")] // first order, no warm-up
    SemiImplicitEuler,
}

impl IntegratorKind {
    pub fn build(self) -> Box<dyn Integrator> {
        match self {
            IntegratorKind::Leapfrog => Box::new(Leapfrog),
            IntegratorKind::SemiImplicitEuler => Box::new(SemiImplicitEuler),
        }
    }
}

impl<'de> Deserialize<'de> for IntegratorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        <IntegratorKind as ValueEnum>::from_str(&name, false).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::NewtonianGravity;
    use crate::simulation::states::{HalfStep, NVec3};
    use approx::assert_relative_eq;

    fn earth() -> Body {
        Body::new("Earth", 5.972e24, [1.496e11, 0.0, 0.0], [0.0, 29783.0, 0.0]).unwrap()
    }

    fn sun() -> PointMass {
        PointMass { x: NVec3::zeros(), m: 1.989e30 }
    }

    #[test]
    fn euler_cromer_moves_with_updated_velocity() {
        let gravity = NewtonianGravity::default();
        let dt = 86400.0;
        let mut body = earth();
        let x0 = body.x;
        let v0 = body.v;
        let a0 = gravity.acceleration(&body, &[sun()]);

        SemiImplicitEuler.step(&mut body, &[sun()], dt, &gravity);

        let v1 = v0 + dt * a0;
        assert_relative_eq!(body.v, v1, max_relative = 1e-14);
        assert_relative_eq!(body.x, x0 + dt * v1, max_relative = 1e-14);
        assert_eq!(body.trajectory(), &[body.x]);
        assert_eq!(body.half_step(), HalfStep::Uninitialized);
    }

    #[test]
    fn leapfrog_warm_up_uses_pre_drift_state() {
        let gravity = NewtonianGravity::default();
        let dt = 86400.0;
        let mut body = earth();
        let x0 = body.x;
        let v0 = body.v;

        Leapfrog.step(&mut body, &[sun()], dt, &gravity);

        let a0 = gravity.acceleration(&earth(), &[sun()]);
        let v_half = v0 + 0.5 * dt * a0;
        let x1 = x0 + dt * v_half;
        let moved = Body::new("moved", 5.972e24, x1.into(), [0.0; 3]).unwrap();
        let a1 = gravity.acceleration(&moved, &[sun()]);

        assert_relative_eq!(body.x, x1, max_relative = 1e-14);
        assert_relative_eq!(body.v, v_half + 0.5 * dt * a1, max_relative = 1e-14);
        let carried = body.half_step_velocity().expect("leapfrog should be running");
        assert_relative_eq!(carried, v_half + dt * a1, max_relative = 1e-14);
    }

    #[test]
    fn leapfrog_second_step_skips_warm_up() {
        let gravity = NewtonianGravity::default();
        let dt = 86400.0;
        let mut body = earth();
        Leapfrog.step(&mut body, &[sun()], dt, &gravity);

        let v_half = body.half_step_velocity().unwrap();
        let x1 = body.x;
        Leapfrog.step(&mut body, &[sun()], dt, &gravity);

        // The drift used the carried half-step velocity, not body.v
        assert_relative_eq!(body.x, x1 + dt * v_half, max_relative = 1e-14);
        assert_eq!(body.trajectory().len(), 2);
    }

    #[test]
    fn leapfrog_closing_kick_reads_the_given_neighbours() {
        let gravity = NewtonianGravity::default();
        let dt = 86400.0;
        let mut body = earth();
        let moved_sun = PointMass { x: NVec3::new(1.0e9, 0.0, 0.0), m: 1.989e30 };

        Leapfrog.kick_drift(&mut body, &[sun()], dt, &gravity);
        let v_half = body.half_step_velocity().unwrap();
        let x1 = body.x;
        assert_eq!(body.trajectory(), &[x1]);

        Leapfrog.kick(&mut body, &[moved_sun], dt, &gravity);
        let a1 = gravity.acceleration(&body, &[moved_sun]);

        assert_eq!(body.x, x1);
        assert_relative_eq!(body.v, v_half + 0.5 * dt * a1, max_relative = 1e-14);
        assert_relative_eq!(body.half_step_velocity().unwrap(), v_half + dt * a1, max_relative = 1e-14);
        assert!(Leapfrog.has_closing_kick());
        assert!(!SemiImplicitEuler.has_closing_kick());
    }

    #[test]
    fn integrator_kind_parses_names() {
        let parse = |s: &str| <IntegratorKind as ValueEnum>::from_str(s, false);
        assert_eq!(parse("leapfrog"), Ok(IntegratorKind::Leapfrog));
        assert_eq!(parse("euler_cromer"), Ok(IntegratorKind::SemiImplicitEuler));
        assert_eq!(parse("semi_implicit_euler"), Ok(IntegratorKind::SemiImplicitEuler));
        assert!(parse("rk4").is_err());
        assert_eq!(IntegratorKind::Leapfrog.build().name(), "leapfrog");
        assert_eq!(IntegratorKind::SemiImplicitEuler.build().name(), "euler_cromer");
    }
}
