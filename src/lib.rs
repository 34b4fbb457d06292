pub mod error;
pub mod simulation;
pub mod configuration;

pub use error::{InvalidBodyError, ScenarioError};

pub use simulation::states::{Body, BodySet, HalfStep, PointMass, NVec3};
pub use simulation::params::{Parameters, G, MIN_DISTANCE, SECONDS_PER_DAY};
pub use simulation::forces::{Acceleration, NewtonianGravity};
pub use simulation::integrator::{Integrator, IntegratorKind, Leapfrog, SemiImplicitEuler};
pub use simulation::engine::{Engine, UpdatePolicy};
pub use simulation::diagnostics::{
    center_of_mass, kinetic_energy, linear_momentum, potential_energy, relative_drift, total_energy,
};
pub use simulation::scenario::{RunSummary, Scenario};

pub use configuration::config::{BodyConfig, EngineConfig, ParametersConfig, ScenarioConfig};
