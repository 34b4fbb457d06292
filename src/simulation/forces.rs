//! Force / acceleration evaluation for the n-body engine
//!
//! Defines the [`Acceleration`] trait used by both integrators and the
//! direct-sum Newtonian gravity that implements it

use log::trace;

use crate::simulation::params::{G, MIN_DISTANCE};
use crate::simulation::states::{Body, NVec3, PointMass};

/// Source of acceleration on a single body
/// `others` must not contain `body` itself; the driver builds it that way
pub trait Acceleration {
    fn acceleration(&self, body: &Body, others: &[PointMass]) -> NVec3;
}

/// Direct O(n) per body Newtonian gravity, no softening
/// Pairs closer than `min_distance` contribute nothing, which keeps
/// coincident bodies finite at the cost of physical exactness
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_distance: f64, // pair skip threshold
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            G,
            min_distance: MIN_DISTANCE,
        }
    }
}

impl NewtonianGravity {
    pub fn new(g: f64, min_distance: f64) -> Self {
        Self { G: g, min_distance }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, body: &Body, others: &[PointMass]) -> NVec3 {
        let xi = body.x; // position of the target
        let mi = body.mass(); // mass of the target

        // Net force on the target, divided by mi at the end
        let mut force = NVec3::zeros();

        for other in others {
            // r points from the target to the other body,
            // so the target is pulled along +r
            let r = other.x - xi;
            let d = r.norm();

            // Coincident (or nearly so): skip the pair instead of dividing by ~0
            if d < self.min_distance {
                trace!("skipping pair at separation {d:e} m (below {:e})", self.min_distance);
                continue;
            }

            // |F| = G * mi * mj / d^2, direction r / d
            let magnitude = self.G * mi * other.m / (d * d);
            force += magnitude * r / d;
        }

        // Newton's second law
        force / mi
    }
}
