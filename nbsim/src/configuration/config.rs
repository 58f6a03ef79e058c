//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants, step size and run length
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A two-body circular orbit matching these types:
//!
//! ```yaml
//! parameters:
//!   G: 1.0             # gravitational constant
//!   softening: 1.0e-6  # softening length (not squared)
//!   dt: 0.001          # fixed step size
//!   steps: 6283        # steps the driver runs
//!
//! bodies:
//!   - x: [ -0.5, 0.0, 0.0 ]
//!     v: [  0.0, -0.7071067811865476, 0.0 ]
//!     m: 1.0
//!   - x: [  0.5, 0.0, 0.0 ]
//!     v: [  0.0,  0.7071067811865476, 0.0 ]
//!     m: 1.0
//! ```
//!
//! Every `parameters` field is optional and defaults to G = 1, softening =
//! 0.05, dt = 0.01, 600 steps. A body's `v` defaults to rest.
#![allow(non_snake_case)]

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::Parameters;

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    #[serde(default = "default_G")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_softening")]
    pub softening: f64, // softening length - bounds the force at tiny separations
    #[serde(default = "default_dt")]
    pub dt: f64, // time step size
    #[serde(default = "default_steps")]
    pub steps: u64, // number of steps to run
}

impl ParametersConfig {
    /// Runtime parameters (run length is a driver concern and stays here)
    pub fn parameters(&self) -> Parameters {
        Parameters::new(self.G, self.softening, self.dt)
    }
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: default_G(),
            softening: default_softening(),
            dt: default_dt(),
            steps: default_steps(),
        }
    }
}

fn default_G() -> f64 {
    Parameters::default().G
}

fn default_softening() -> f64 {
    Parameters::default().softening
}

fn default_dt() -> f64 {
    Parameters::default().dt
}

fn default_steps() -> u64 {
    600
}

fn at_rest() -> Vec<f64> {
    vec![0.0; 3]
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position, three components
    #[serde(default = "at_rest")]
    pub v: Vec<f64>, // Initial velocity, three components
    pub m: f64,      // Mass of the body
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // Bodies that define the initial state of the system
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_scenario() {
        let yaml = r#"
parameters:
  G: 0.5
  softening: 0.0
  dt: 0.001
  steps: 10
bodies:
  - x: [1.0, 2.0, 3.0]
    v: [0.0, 0.1, 0.0]
    m: 2.0
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.parameters.G, 0.5);
        assert_eq!(cfg.parameters.softening, 0.0);
        assert_eq!(cfg.parameters.steps, 10);
        assert_eq!(cfg.bodies.len(), 1);
        assert_eq!(cfg.bodies[0].x, vec![1.0, 2.0, 3.0]);
        assert_eq!(cfg.bodies[0].m, 2.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let yaml = "bodies:\n  - x: [0.0, 0.0, 0.0]\n    m: 1.0\n";
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.parameters, ParametersConfig::default());
        assert_eq!(cfg.parameters.parameters(), Parameters::new(1.0, 0.05, 0.01));
        assert_eq!(cfg.parameters.steps, 600);
        assert_eq!(cfg.bodies[0].v, vec![0.0; 3]);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(ScenarioConfig::from_yaml_str("bodies: [ { m: oops } ]").is_err());
    }
}
