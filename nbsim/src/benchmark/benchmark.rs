//! Wall-clock timing of the force field and the leapfrog step
//!
//! Positions are deterministic (trigonometric), so runs are comparable
//! between machines without a random generator.

use std::time::Instant;

use crate::error::Result;
use crate::simulation::engine::Simulation;
use crate::simulation::forces::{ForceField, NewtonianGravity, ParallelNewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;

/// Time one force evaluation, sequential vs rayon, for growing N
pub fn bench_gravity() -> Result<()> {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let params = make_params();

    for n in ns {
        let (positions, masses) = make_bodies(n);

        // Warm up
        NewtonianGravity.compute_acceleration(&positions, &masses, params.G, params.softening)?;
        ParallelNewtonianGravity.compute_acceleration(&positions, &masses, params.G, params.softening)?;

        let t0 = Instant::now();
        NewtonianGravity.compute_acceleration(&positions, &masses, params.G, params.softening)?;
        let dt_seq = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        ParallelNewtonianGravity.compute_acceleration(&positions, &masses, params.G, params.softening)?;
        let dt_par = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, sequential = {:8.6} s, parallel = {:8.6} s", dt_seq, dt_par);
    }
    Ok(())
}

/// Time full leapfrog steps, sequential vs rayon force field
pub fn bench_step() -> Result<()> {
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 5; // steps averaged per model
    let params = make_params();

    for n in ns {
        let (positions, masses) = make_bodies(n);
        let velocities = vec![NVec3::zeros(); n];

        let mut seq = Simulation::with_force_field(
            NewtonianGravity,
            positions.clone(),
            velocities.clone(),
            masses.clone(),
            params,
        )?;
        let t0 = Instant::now();
        seq.advance(steps)?;
        let seq_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        let mut par = Simulation::with_force_field(
            ParallelNewtonianGravity,
            positions,
            velocities,
            masses,
            params,
        )?;
        let t1 = Instant::now();
        par.advance(steps)?;
        let par_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        println!(
            "N = {:5}, sequential step = {:8.6} s,   parallel step = {:8.6} s",
            n, seq_per_step, par_per_step
        );
    }
    Ok(())
}

/// Positions and unit masses for `n` bodies
fn make_bodies(n: usize) -> (Vec<NVec3>, Vec<f64>) {
    let positions = (0..n)
        .map(|i| {
            let i_f = i as f64;
            NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            )
        })
        .collect();
    (positions, vec![1.0; n])
}

fn make_params() -> Parameters {
    Parameters::new(0.1, 1e-2, 0.001)
}
