pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::states::{NVec3, SimulationState};
pub use simulation::params::Parameters;
pub use simulation::forces::{compute_acceleration, ForceField, NewtonianGravity, ParallelNewtonianGravity};
pub use simulation::engine::Simulation;
pub use simulation::diagnostics::{ConservationBaseline, ConservationReport};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_step};
