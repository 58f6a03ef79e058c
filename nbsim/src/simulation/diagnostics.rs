//! Conservation diagnostics for an isolated N-body system.
//!
//! Momentum and energy of a self-gravitating system are conserved by the
//! physics; the leapfrog keeps momentum to rounding and energy bounded, so
//! drift in these quantities is the main signal of a bad time step.
//!
//! The stored velocities are half a step ahead of the positions, and these
//! functions evaluate whatever they are given as-is.
#![allow(non_snake_case)]

use crate::simulation::engine::Simulation;
use crate::simulation::forces::{displacement, ForceField};
use crate::simulation::states::NVec3;

/// Total linear momentum: sum_i m_i * v_i
pub fn total_momentum(velocities: &[NVec3], masses: &[f64]) -> NVec3 {
    velocities
        .iter()
        .zip(masses)
        .fold(NVec3::zeros(), |p, (v, &m)| p + m * *v)
}

/// Kinetic energy: sum_i m_i |v_i|^2 / 2
pub fn kinetic_energy(velocities: &[NVec3], masses: &[f64]) -> f64 {
    velocities
        .iter()
        .zip(masses)
        .map(|(v, &m)| 0.5 * m * v.norm_squared())
        .sum()
}

/// Softened potential energy: -sum_{i<j} G m_i m_j / sqrt(r^2 + eps^2)
///
/// Pairs at zero softened distance are skipped.
pub fn potential_energy(positions: &[NVec3], masses: &[f64], G: f64, softening: f64) -> f64 {
    let n = positions.len().min(masses.len());
    let eps2 = softening * softening;
    let mut u = 0.0;

    for i in 0..n {
        for j in (i + 1)..n {
            let r = displacement(&positions[i], &positions[j]);
            let r_soft = (r.norm_squared() + eps2).sqrt();
            if r_soft > 0.0 {
                u -= G * masses[i] * masses[j] / r_soft;
            }
        }
    }

    u
}

/// Mass-weighted mean position, zero for an empty system
pub fn center_of_mass(positions: &[NVec3], masses: &[f64]) -> NVec3 {
    let total: f64 = masses.iter().sum();
    if total <= 0.0 {
        return NVec3::zeros();
    }
    let weighted = positions
        .iter()
        .zip(masses)
        .fold(NVec3::zeros(), |c, (x, &m)| c + m * *x);
    weighted / total
}

/// Energy and momentum captured at a reference point of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationBaseline {
    pub energy: f64,
    pub momentum: NVec3,
}

impl ConservationBaseline {
    pub fn capture<F: ForceField>(sim: &Simulation<F>) -> Self {
        Self {
            energy: sim.total_energy(),
            momentum: sim.momentum(),
        }
    }

    /// Compare the current state of `sim` against this baseline
    pub fn check<F: ForceField>(&self, sim: &Simulation<F>) -> ConservationReport {
        let energy = sim.total_energy();
        let momentum = sim.momentum();

        // relative where the baseline allows it
        let energy_error = if self.energy.abs() > 1e-12 {
            (energy - self.energy).abs() / self.energy.abs()
        } else {
            (energy - self.energy).abs()
        };

        ConservationReport {
            step: sim.step_count(),
            energy,
            energy_error,
            momentum_error: momentum - self.momentum,
        }
    }
}

/// Drift of the conserved quantities at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationReport {
    pub step: u64,
    pub energy: f64,
    /// |E - E0| / |E0|, or absolute when E0 is ~0
    pub energy_error: f64,
    /// p - p0
    pub momentum_error: NVec3,
}

impl ConservationReport {
    pub fn is_violated(&self, energy_tol: f64, momentum_tol: f64) -> bool {
        self.energy_error > energy_tol || self.momentum_error.norm() > momentum_tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn momentum_and_kinetic_energy_sum_over_bodies() {
        let v = vec![NVec3::new(1.0, 0.0, 0.0), NVec3::new(0.0, -2.0, 0.0)];
        let m = vec![2.0, 0.5];

        let p = total_momentum(&v, &m);
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, -1.0);
        assert_relative_eq!(p.z, 0.0);

        // 0.5*2*1 + 0.5*0.5*4
        assert_relative_eq!(kinetic_energy(&v, &m), 2.0);
    }

    #[test]
    fn potential_energy_of_a_pair() {
        let x = vec![NVec3::zeros(), NVec3::new(3.0, 4.0, 0.0)];
        let m = vec![2.0, 3.0];

        assert_relative_eq!(potential_energy(&x, &m, 1.0, 0.0), -6.0 / 5.0, epsilon = 1e-15);
        // softening lengthens the effective separation
        assert!(potential_energy(&x, &m, 1.0, 1.0) > -6.0 / 5.0);
    }

    #[test]
    fn coincident_bodies_without_softening_add_no_potential() {
        let x = vec![NVec3::zeros(), NVec3::zeros()];
        let m = vec![1.0, 1.0];
        assert_eq!(potential_energy(&x, &m, 1.0, 0.0), 0.0);
    }

    #[test]
    fn center_of_mass_is_mass_weighted() {
        let x = vec![NVec3::new(-1.0, 0.0, 0.0), NVec3::new(2.0, 0.0, 0.0)];
        let m = vec![2.0, 1.0];
        let c = center_of_mass(&x, &m);
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-15);

        assert_eq!(center_of_mass(&[], &[]), NVec3::zeros());
    }
}
