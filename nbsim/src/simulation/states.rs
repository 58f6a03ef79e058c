//! Core state types for the N-body simulation.
//!
//! `SimulationState` keeps positions, velocities and masses in three
//! contiguous buffers (one entry per body) plus the step counter.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    pub positions: Vec<NVec3>, // 3d positions
    pub velocities: Vec<NVec3>, // 3d velocities, half a step ahead of positions
    pub masses: Vec<f64>, // masses, fixed for the run
    pub step: u64, // completed steps
}

impl SimulationState {
    /// Number of bodies
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
