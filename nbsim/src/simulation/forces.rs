//! Gravitational force fields for the n-body engine
//!
//! Defines the [`ForceField`] trait and the direct-summation Newtonian
//! gravity that implements it, sequentially and with a rayon worker pool
#![allow(non_snake_case)]

use rayon::prelude::*;

use crate::error::{Result, SimError};
use crate::simulation::states::NVec3;

/// Source of per-body accelerations
///
/// Implementations are pure: the same positions, masses, `G` and softening
/// always give the same accelerations, and the inputs are never modified.
/// The returned vector has one entry per body.
pub trait ForceField {
    fn compute_acceleration(
        &self,
        positions: &[NVec3],
        masses: &[f64],
        G: f64,
        softening: f64,
    ) -> Result<Vec<NVec3>>;
}

/// Newtonian gravity with Plummer-style softening (direct n^2 sum)
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonianGravity;

impl ForceField for NewtonianGravity {
    fn compute_acceleration(
        &self,
        positions: &[NVec3],
        masses: &[f64],
        G: f64,
        softening: f64,
    ) -> Result<Vec<NVec3>> {
        check_shapes(positions, masses)?;
        let n = positions.len();
        if n <= 1 { // nothing to pull on
            return Ok(vec![NVec3::zeros(); n]);
        }

        let eps2 = softening * softening;
        Ok((0..n)
            .map(|i| row_acceleration(i, positions, masses, G, eps2))
            .collect())
    }
}

/// Same force law as [`NewtonianGravity`], with the outer loop over bodies
/// spread across the rayon thread pool
///
/// Every row sums over `j` in the same order as the sequential field, so the
/// two produce bit-identical results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelNewtonianGravity;

impl ForceField for ParallelNewtonianGravity {
    fn compute_acceleration(
        &self,
        positions: &[NVec3],
        masses: &[f64],
        G: f64,
        softening: f64,
    ) -> Result<Vec<NVec3>> {
        check_shapes(positions, masses)?;
        let n = positions.len();
        if n <= 1 {
            return Ok(vec![NVec3::zeros(); n]);
        }

        let eps2 = softening * softening;
        Ok((0..n)
            .into_par_iter()
            .map(|i| row_acceleration(i, positions, masses, G, eps2))
            .collect())
    }
}

/// Sequential direct-summation accelerations for `positions`/`masses`
pub fn compute_acceleration(
    positions: &[NVec3],
    masses: &[f64],
    G: f64,
    softening: f64,
) -> Result<Vec<NVec3>> {
    NewtonianGravity.compute_acceleration(positions, masses, G, softening)
}

/// Displacement vector pointing from `from` to `to`
///
/// IEEE subtraction is sign-symmetric, so
/// `displacement(a, b) == -displacement(b, a)` holds exactly.
#[inline]
pub fn displacement(from: &NVec3, to: &NVec3) -> NVec3 {
    to - from
}

fn check_shapes(positions: &[NVec3], masses: &[f64]) -> Result<()> {
    if positions.len() != masses.len() {
        return Err(SimError::InvalidParameter(format!(
            "{} positions but {} masses",
            positions.len(),
            masses.len()
        )));
    }
    Ok(())
}

/// Acceleration on body `i` from every other body
fn row_acceleration(i: usize, positions: &[NVec3], masses: &[f64], G: f64, eps2: f64) -> NVec3 {
    let xi = &positions[i];
    let mut acc = NVec3::zeros();

    for (j, (xj, &mj)) in positions.iter().zip(masses).enumerate() {
        // skipped explicitly: with eps2 == 0 the term is 0 * inf
        if j == i {
            continue;
        }

        // r points from i to j, so i is pulled along +r
        let r = displacement(xi, xj);

        // softened squared distance |r|^2 + eps^2
        let d2 = r.dot(&r) + eps2;

        // 1 / |r_soft|^3
        let inv_r = d2.sqrt().recip();
        let inv_r3 = inv_r * inv_r * inv_r;

        // a_i += G * m_j * r / |r_soft|^3
        acc += G * mj * inv_r3 * r;
    }

    acc
}
