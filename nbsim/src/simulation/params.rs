//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the settings fixed for a whole run:
//! - gravitational constant `G`,
//! - softening length (added in quadrature to the separation),
//! - integration step size `dt`

use crate::error::{Result, SimError};

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub softening: f64, // softening length, not squared
    pub dt: f64, // step size
}

impl Parameters {
    #[allow(non_snake_case)]
    pub fn new(G: f64, softening: f64, dt: f64) -> Self {
        Self { G, softening, dt }
    }

    /// Squared softening length, the form the force law uses
    pub fn eps2(&self) -> f64 {
        self.softening * self.softening
    }

    /// Reject G <= 0, softening < 0, dt <= 0 (NaN fails every check)
    pub fn validate(&self) -> Result<()> {
        if !(self.G > 0.0 && self.G.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "G must be positive and finite, got {}",
                self.G
            )));
        }
        if !(self.softening >= 0.0 && self.softening.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "softening must be non-negative and finite, got {}",
                self.softening
            )));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 1.0,
            softening: 0.05,
            dt: 0.01,
        }
    }
}
