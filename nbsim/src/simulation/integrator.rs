//! Fixed-step leapfrog building blocks
//!
//! The kick and drift updates that [`Simulation`](super::engine::Simulation)
//! sequences, operating in place on the contiguous state buffers

use super::states::NVec3;

/// Half kick applied once at initialization: v_1/2 = v_0 + (dt/2) * a_0
pub fn half_kick(velocities: &mut [NVec3], accels: &[NVec3], dt: f64) {
    kick(velocities, accels, 0.5 * dt);
}

/// Drift: x_n+1 = x_n + dt * v_n+1/2
pub fn drift(positions: &mut [NVec3], velocities: &[NVec3], dt: f64) {
    for (x, v) in positions.iter_mut().zip(velocities) {
        *x += dt * *v;
    }
}

/// Kick: v_n+3/2 = v_n+1/2 + dt * a_n+1
pub fn kick(velocities: &mut [NVec3], accels: &[NVec3], dt: f64) {
    for (v, a) in velocities.iter_mut().zip(accels) {
        *v += dt * *a;
    }
}

/// Index of the first vector with a NaN or infinite component
pub fn first_non_finite(values: &[NVec3]) -> Option<usize> {
    values.iter().position(|v| !v.iter().all(|c| c.is_finite()))
}
