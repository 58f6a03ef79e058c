//! The simulation engine: owns the body state and advances it
//!
//! [`Simulation`] pairs a [`ForceField`] with the fixed [`Parameters`] and the
//! evolving [`SimulationState`]. `initialize` and `step` are the only
//! mutators, which keeps the velocities exactly half a step ahead of the
//! positions for the whole run.

use log::{debug, trace, warn};

use crate::error::{Result, SimError};
use crate::simulation::diagnostics;
use crate::simulation::forces::{ForceField, NewtonianGravity};
use crate::simulation::integrator::{drift, first_non_finite, half_kick, kick};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Diverged,
}

/// N-body system advanced by a kick-drift-kick leapfrog
///
/// Construction performs the initial half kick. Every [`step`](Self::step)
/// then drifts positions by a full step, evaluates forces at the drifted
/// positions and kicks velocities by a full step, in that order.
#[derive(Debug, Clone)]
pub struct Simulation<F: ForceField = NewtonianGravity> {
    force_field: F,
    parameters: Parameters,
    state: SimulationState,
    phase: Phase,
}

impl Simulation<NewtonianGravity> {
    /// Initialize a simulation driven by sequential direct-summation gravity
    pub fn new(
        positions: Vec<NVec3>,
        velocities: Vec<NVec3>,
        masses: Vec<f64>,
        parameters: Parameters,
    ) -> Result<Self> {
        Self::with_force_field(NewtonianGravity, positions, velocities, masses, parameters)
    }
}

impl<F: ForceField> Simulation<F> {
    /// Initialize a simulation driven by `force_field`
    pub fn with_force_field(
        force_field: F,
        positions: Vec<NVec3>,
        velocities: Vec<NVec3>,
        masses: Vec<f64>,
        parameters: Parameters,
    ) -> Result<Self> {
        let mut sim = Self {
            force_field,
            parameters,
            state: SimulationState::default(),
            phase: Phase::Ready,
        };
        sim.initialize(positions, velocities, masses, parameters)?;
        Ok(sim)
    }

    /// Replace the whole state and parameters, then apply the half kick
    ///
    /// The body count may differ from the previous run. Inputs are validated
    /// and the half kick computed before anything is stored, so on error the
    /// instance is left exactly as it was.
    pub fn initialize(
        &mut self,
        positions: Vec<NVec3>,
        mut velocities: Vec<NVec3>,
        masses: Vec<f64>,
        parameters: Parameters,
    ) -> Result<()> {
        parameters.validate()?;
        validate_bodies(&positions, &velocities, &masses)?;

        let accels = self.force_field.compute_acceleration(
            &positions,
            &masses,
            parameters.G,
            parameters.softening,
        )?;
        if let Some(body) = first_non_finite(&accels) {
            warn!("non-finite initial acceleration on body {body}");
            return Err(SimError::NumericInstability {
                step: 0,
                body,
                quantity: "acceleration",
            });
        }

        // stagger velocities half a step ahead of positions
        half_kick(&mut velocities, &accels, parameters.dt);
        if let Some(body) = first_non_finite(&velocities) {
            warn!("non-finite velocity on body {body} after the initial half kick");
            return Err(SimError::NumericInstability {
                step: 0,
                body,
                quantity: "velocity",
            });
        }

        debug!(
            "initialized {} bodies (G = {}, softening = {}, dt = {})",
            positions.len(),
            parameters.G,
            parameters.softening,
            parameters.dt
        );

        self.parameters = parameters;
        self.state = SimulationState {
            positions,
            velocities,
            masses,
            step: 0,
        };
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Advance by one time step of `dt`
    ///
    /// Returns the post-step positions and velocities. A non-finite value
    /// fails with [`SimError::NumericInstability`]; after that every call
    /// returns [`SimError::Diverged`] until the simulation is re-initialized.
    pub fn step(&mut self) -> Result<(&[NVec3], &[NVec3])> {
        if self.phase == Phase::Diverged {
            return Err(SimError::Diverged {
                step: self.state.step,
            });
        }
        let dt = self.parameters.dt;

        // 1. Drift: x_n+1 = x_n + dt * v_n+1/2
        drift(&mut self.state.positions, &self.state.velocities, dt);
        if let Some(body) = first_non_finite(&self.state.positions) {
            return Err(self.diverge(body, "position"));
        }

        // 2. a_n+1 from the drifted positions
        let accels = match self.force_field.compute_acceleration(
            &self.state.positions,
            &self.state.masses,
            self.parameters.G,
            self.parameters.softening,
        ) {
            Ok(accels) => accels,
            Err(err) => {
                self.phase = Phase::Diverged;
                return Err(err);
            }
        };
        if let Some(body) = first_non_finite(&accels) {
            return Err(self.diverge(body, "acceleration"));
        }

        // 3. Kick: v_n+3/2 = v_n+1/2 + dt * a_n+1
        kick(&mut self.state.velocities, &accels, dt);
        if let Some(body) = first_non_finite(&self.state.velocities) {
            return Err(self.diverge(body, "velocity"));
        }

        // 4.
        self.state.step += 1;
        trace!("step {} done", self.state.step);

        Ok((self.state.positions.as_slice(), self.state.velocities.as_slice()))
    }

    /// Call [`step`](Self::step) `steps` times, stopping at the first error
    pub fn advance(&mut self, steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    fn diverge(&mut self, body: usize, quantity: &'static str) -> SimError {
        let step = self.state.step + 1;
        warn!("numeric instability at step {step}: non-finite {quantity} on body {body}");
        self.phase = Phase::Diverged;
        SimError::NumericInstability {
            step,
            body,
            quantity,
        }
    }

    pub fn positions(&self) -> &[NVec3] {
        &self.state.positions
    }

    /// Velocities, half a step ahead of [`positions`](Self::positions)
    pub fn velocities(&self) -> &[NVec3] {
        &self.state.velocities
    }

    pub fn masses(&self) -> &[f64] {
        &self.state.masses
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn force_field(&self) -> &F {
        &self.force_field
    }

    pub fn step_count(&self) -> u64 {
        self.state.step
    }

    /// Simulated time of the positions: step count times dt
    pub fn elapsed_time(&self) -> f64 {
        self.state.step as f64 * self.parameters.dt
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn is_diverged(&self) -> bool {
        self.phase == Phase::Diverged
    }

    pub fn momentum(&self) -> NVec3 {
        diagnostics::total_momentum(&self.state.velocities, &self.state.masses)
    }

    pub fn center_of_mass(&self) -> NVec3 {
        diagnostics::center_of_mass(&self.state.positions, &self.state.masses)
    }

    pub fn kinetic_energy(&self) -> f64 {
        diagnostics::kinetic_energy(&self.state.velocities, &self.state.masses)
    }

    pub fn potential_energy(&self) -> f64 {
        diagnostics::potential_energy(
            &self.state.positions,
            &self.state.masses,
            self.parameters.G,
            self.parameters.softening,
        )
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}

fn validate_bodies(positions: &[NVec3], velocities: &[NVec3], masses: &[f64]) -> Result<()> {
    if positions.len() != velocities.len() || positions.len() != masses.len() {
        return Err(SimError::InvalidParameter(format!(
            "shape mismatch: {} positions, {} velocities, {} masses",
            positions.len(),
            velocities.len(),
            masses.len()
        )));
    }
    if let Some(i) = masses.iter().position(|&m| !(m > 0.0 && m.is_finite())) {
        return Err(SimError::InvalidParameter(format!(
            "mass of body {i} must be positive and finite, got {}",
            masses[i]
        )));
    }
    if let Some(i) = first_non_finite(positions) {
        return Err(SimError::InvalidParameter(format!(
            "position of body {i} is not finite"
        )));
    }
    if let Some(i) = first_non_finite(velocities) {
        return Err(SimError::InvalidParameter(format!(
            "velocity of body {i} is not finite"
        )));
    }
    Ok(())
}
