//! Build ready-to-step simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - numerical parameters (`Parameters`)
//! - the number of steps the driver should run
//! - an initialized `Simulation` (half kick already applied)

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::Simulation;
use crate::simulation::forces::{ForceField, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;

pub struct Scenario<F: ForceField = NewtonianGravity> {
    pub parameters: Parameters,
    pub steps: u64,
    pub simulation: Simulation<F>,
}

impl Scenario {
    /// Build a scenario driven by sequential direct-summation gravity
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        Self::build_with(cfg, NewtonianGravity)
    }
}

impl<F: ForceField> Scenario<F> {
    /// Build a scenario driven by `force_field`
    pub fn build_with(cfg: ScenarioConfig, force_field: F) -> Result<Self> {
        let parameters = cfg.parameters.parameters();

        // Bodies: map `BodyConfig` -> contiguous runtime buffers
        let n = cfg.bodies.len();
        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        let mut masses = Vec::with_capacity(n);
        for (i, bc) in cfg.bodies.iter().enumerate() {
            let (x, v, m) = body_state(i, bc)?;
            positions.push(x);
            velocities.push(v);
            masses.push(m);
        }

        let simulation =
            Simulation::with_force_field(force_field, positions, velocities, masses, parameters)?;

        Ok(Self {
            parameters,
            steps: cfg.parameters.steps,
            simulation,
        })
    }
}

fn body_state(i: usize, bc: &BodyConfig) -> Result<(NVec3, NVec3, f64)> {
    Ok((to_vec3(&bc.x, "x", i)?, to_vec3(&bc.v, "v", i)?, bc.m))
}

fn to_vec3(values: &[f64], field: &str, body: usize) -> Result<NVec3> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::InvalidParameter(format!(
            "body {body}: `{field}` needs 3 components, got {}",
            values.len()
        ))),
    }
}
