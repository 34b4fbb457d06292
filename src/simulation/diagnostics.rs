//! Conserved-quantity diagnostics for a body set.
//!
//! These read the synchronised full-step velocity `v` of each body, which
//! is what the leapfrog integrator publishes for external consumers.

use super::states::{BodySet, NVec3};

/// Sum of ½ m v² over all bodies.
pub fn kinetic_energy(set: &BodySet) -> f64 {
    set.iter().map(|b| 0.5 * b.mass() * b.v.norm_squared()).sum()
}

/// Pairwise gravitational potential energy, -G mi mj / r over unordered pairs.
///
/// Pairs closer than `min_distance` are skipped, the same way the force
/// evaluator skips them.
pub fn potential_energy(set: &BodySet, g: f64, min_distance: f64) -> f64 {
    let bodies = set.bodies();
    let mut energy = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            let d = (bj.x - bi.x).norm();
            if d < min_distance {
                continue;
            }
            energy -= g * bi.mass() * bj.mass() / d;
        }
    }
    energy
}

pub fn total_energy(set: &BodySet, g: f64, min_distance: f64) -> f64 {
    kinetic_energy(set) + potential_energy(set, g, min_distance)
}

/// Σ m v
pub fn linear_momentum(set: &BodySet) -> NVec3 {
    set.iter().fold(NVec3::zeros(), |p, b| p + b.mass() * b.v)
}

/// Mass-weighted mean position, `None` for an empty set.
pub fn center_of_mass(set: &BodySet) -> Option<NVec3> {
    if set.is_empty() {
        return None;
    }
    let total: f64 = set.iter().map(|b| b.mass()).sum();
    let weighted = set.iter().fold(NVec3::zeros(), |acc, b| acc + b.mass() * b.x);
    Some(weighted / total)
}

/// |current - initial| / |initial|, or the absolute change when `initial` is 0.
pub fn relative_drift(initial: f64, current: f64) -> f64 {
    if initial == 0.0 {
        (current - initial).abs()
    } else {
        ((current - initial) / initial).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::G;
    use crate::simulation::states::Body;
    use approx::assert_relative_eq;

    fn pair() -> BodySet {
        BodySet::new(vec![
            Body::new("a", 2.0, [-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]).unwrap(),
            Body::new("b", 2.0, [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn energies_of_symmetric_pair() {
        let set = pair();
        assert_relative_eq!(kinetic_energy(&set), 2.0);
        assert_relative_eq!(potential_energy(&set, G, 1e-10), -G * 4.0 / 2.0);
        assert_relative_eq!(total_energy(&set, G, 1e-10), 2.0 - G * 2.0);
    }

    #[test]
    fn symmetric_pair_has_zero_momentum_and_centered_mass() {
        let set = pair();
        assert_eq!(linear_momentum(&set), NVec3::zeros());
        assert_eq!(center_of_mass(&set), Some(NVec3::zeros()));
    }

    #[test]
    fn coincident_pair_has_finite_potential() {
        let set = BodySet::new(vec![
            Body::new("a", 1.0, [0.0; 3], [0.0; 3]).unwrap(),
            Body::new("b", 1.0, [0.0; 3], [0.0; 3]).unwrap(),
        ])
        .unwrap();
        assert_eq!(potential_energy(&set, G, 1e-10), 0.0);
    }

    #[test]
    fn drift_is_relative() {
        assert_relative_eq!(relative_drift(-2.0, -2.02), 0.01, max_relative = 1e-12);
        assert_eq!(relative_drift(0.0, 0.5), 0.5);
    }
}
