//! Core state types for the N-body simulation.
//!
//! - `Body`      one point mass: kinematic state, leapfrog memory, trajectory
//! - `BodySet`   ordered collection of bodies plus the current simulated time `t`
//! - `PointMass` read-only position/mass view of a body, used as the `others`
//!   input of the force evaluator
//!
//! Name and mass are fixed once a body is built; only `x`, `v` and the
//! integrator memory change during a run.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector3;

use crate::error::InvalidBodyError;

pub type NVec3 = Vector3<f64>;

/// Warm-up state of the leapfrog integrator for one body.
///
/// Starts `Uninitialized`; the first leapfrog step moves it to `Running` and
/// it stays there for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HalfStep {
    #[default]
    Uninitialized,
    Running { half_step_velocity: NVec3 },
}

#[derive(Debug, Clone)]
pub struct Body {
    name: String, // label for reporting only
    m: f64, // mass, > 0
    pub x: NVec3, // position
    pub v: NVec3, // velocity (full step)
    half_step: HalfStep, // leapfrog memory
    trajectory: Vec<NVec3>, // one position per completed step
}

impl Body {
    /// Build a body, rejecting non-positive mass and non-finite components.
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        position: [f64; 3],
        velocity: [f64; 3],
    ) -> Result<Self, InvalidBodyError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidBodyError::EmptyName);
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(InvalidBodyError::NonPositiveMass { name, mass });
        }
        if position.iter().any(|c| !c.is_finite()) {
            return Err(InvalidBodyError::NonFinite { name, field: "position" });
        }
        if velocity.iter().any(|c| !c.is_finite()) {
            return Err(InvalidBodyError::NonFinite { name, field: "velocity" });
        }

        Ok(Self {
            name,
            m: mass,
            x: NVec3::from(position),
            v: NVec3::from(velocity),
            half_step: HalfStep::Uninitialized,
            trajectory: Vec::new(),
        })
    }

    /// Same as [`Body::new`] but from slices, as they come out of config files.
    pub fn from_slices(
        name: impl Into<String>,
        mass: f64,
        position: &[f64],
        velocity: &[f64],
    ) -> Result<Self, InvalidBodyError> {
        let name = name.into();
        let position = to_array(&name, "position", position)?;
        let velocity = to_array(&name, "velocity", velocity)?;
        Self::new(name, mass, position, velocity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn half_step(&self) -> HalfStep {
        self.half_step
    }

    /// Mid-step velocity carried by the leapfrog integrator, if it has started.
    pub fn half_step_velocity(&self) -> Option<NVec3> {
        match self.half_step {
            HalfStep::Uninitialized => None,
            HalfStep::Running { half_step_velocity } => Some(half_step_velocity),
        }
    }

    pub(crate) fn set_half_step_velocity(&mut self, half_step_velocity: NVec3) {
        self.half_step = HalfStep::Running { half_step_velocity };
    }

    /// Drop the leapfrog memory so the next leapfrog step warms up again.
    pub fn reset_integrator(&mut self) {
        self.half_step = HalfStep::Uninitialized;
    }

    pub fn trajectory(&self) -> &[NVec3] {
        &self.trajectory
    }

    /// Append the current position to the trajectory.
    pub(crate) fn record_position(&mut self) {
        self.trajectory.push(self.x);
    }

    pub fn point_mass(&self) -> PointMass {
        PointMass { x: self.x, m: self.m }
    }
}

fn to_array(name: &str, field: &'static str, values: &[f64]) -> Result<[f64; 3], InvalidBodyError> {
    <[f64; 3]>::try_from(values).map_err(|_| InvalidBodyError::Dimension {
        name: name.to_owned(),
        field,
        len: values.len(),
    })
}

/// Position and mass of a body as seen by a neighbour's force evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub x: NVec3,
    pub m: f64,
}

impl From<&Body> for PointMass {
    fn from(body: &Body) -> Self {
        body.point_mass()
    }
}

/// Ordered set of bodies with unique names.
#[derive(Debug, Clone)]
pub struct BodySet {
    bodies: Vec<Body>,
    t: f64, // simulated time since the set was built
    steps: usize, // completed steps
}

impl BodySet {
    pub fn new(bodies: Vec<Body>) -> Result<Self, InvalidBodyError> {
        let mut seen = HashSet::with_capacity(bodies.len());
        for b in &bodies {
            if !seen.insert(b.name()) {
                return Err(InvalidBodyError::DuplicateName(b.name().to_owned()));
            }
        }
        Ok(Self { bodies, t: 0.0, steps: 0 })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    /// Simulated time since the set was built, in seconds
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub(crate) fn advance_clock(&mut self, dt: f64) {
        self.t += dt;
        self.steps += 1;
    }

    /// Positions and masses of every body, in set order.
    pub fn snapshot(&self) -> Vec<PointMass> {
        self.bodies.iter().map(PointMass::from).collect()
    }

    pub fn trajectory(&self, name: &str) -> Option<&[NVec3]> {
        self.get(name).map(Body::trajectory)
    }

    /// `(name, trajectory)` pairs in set order.
    pub fn trajectories(&self) -> impl Iterator<Item = (&str, &[NVec3])> {
        self.bodies.iter().map(|b| (b.name(), b.trajectory()))
    }

    pub fn trajectory_map(&self) -> HashMap<&str, &[NVec3]> {
        self.trajectories().collect()
    }

    /// Reset leapfrog memory on every body.
    pub fn reset_integrator(&mut self) {
        for b in &mut self.bodies {
            b.reset_integrator();
        }
    }
}

impl<'a> IntoIterator for &'a BodySet {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
