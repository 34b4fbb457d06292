//! Property-based tests for the force evaluator and the driver using proptest.

use proptest::prelude::*;

use solsim::{Acceleration, Body, BodySet, Engine, IntegratorKind, NewtonianGravity, UpdatePolicy};

fn coords() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-1.0e12f64..1.0e12)
}

fn body_strategy() -> impl Strategy<Value = (f64, [f64; 3], [f64; 3])> {
    (1.0e20f64..1.0e31, coords(), prop::array::uniform3(-5.0e4f64..5.0e4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// m1 a1 + m2 a2 = 0 for any well-separated pair.
    #[test]
    fn prop_pair_forces_cancel(
        m1 in 1.0e20f64..1.0e31,
        m2 in 1.0e20f64..1.0e31,
        x1 in coords(),
        offset in (1.0e3f64..1.0e12, -1.0e12f64..1.0e12, -1.0e12f64..1.0e12),
    ) {
        let x2 = [x1[0] + offset.0, x1[1] + offset.1, x1[2] + offset.2];
        let a = Body::new("a", m1, x1, [0.0; 3]).unwrap();
        let b = Body::new("b", m2, x2, [0.0; 3]).unwrap();
        let gravity = NewtonianGravity::default();

        let a1 = gravity.acceleration(&a, &[b.point_mass()]);
        let a2 = gravity.acceleration(&b, &[a.point_mass()]);

        let net = a1 * m1 + a2 * m2;
        let scale = (a1 * m1).norm();
        prop_assert!(
            net.norm() <= 1e-12 * scale,
            "Net force {:e} not negligible against {:e}",
            net.norm(), scale
        );
    }

    /// Every body ends a run with exactly one trajectory point per step.
    #[test]
    fn prop_trajectory_length_equals_steps(
        specs in prop::collection::vec(body_strategy(), 1..6),
        steps in 0usize..20,
        leapfrog in any::<bool>(),
        snapshot in any::<bool>(),
    ) {
        let bodies = specs
            .iter()
            .enumerate()
            .map(|(i, (m, x, v))| Body::new(format!("body{i}"), *m, *x, *v).unwrap())
            .collect();
        let mut set = BodySet::new(bodies).unwrap();

        let kind = if leapfrog { IntegratorKind::Leapfrog } else { IntegratorKind::SemiImplicitEuler };
        let policy = if snapshot { UpdatePolicy::Snapshot } else { UpdatePolicy::Sequential };
        Engine::with_gravity(kind, NewtonianGravity::default(), policy)
            .run(&mut set, steps, 86400.0)
            .unwrap();

        for (name, trajectory) in set.trajectories() {
            prop_assert_eq!(trajectory.len(), steps, "{}", name);
        }
        prop_assert_eq!(set.steps(), steps);
    }
}
