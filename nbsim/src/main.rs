use nbsim::{ConservationBaseline, ForceField, NewtonianGravity, ParallelNewtonianGravity};
use nbsim::{Scenario, ScenarioConfig};
use nbsim::{bench_gravity, bench_step};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Direct-summation N-body simulation with a leapfrog integrator")]
struct Args {
    /// Scenario YAML, as a path or a name under `scenarios/`
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Override the scenario's step count
    #[arg(long)]
    steps: Option<u64>,

    /// Log energy and momentum drift every N steps (0 disables)
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Evaluate forces on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// look in scenarios/ when the name is not a path to an existing file
fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.is_file() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let scenario_cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn run<F: ForceField>(mut scenario: Scenario<F>, steps: u64, report_every: u64) -> Result<()> {
    let sim = &mut scenario.simulation;
    let baseline = ConservationBaseline::capture(sim);
    info!(
        "running {} bodies for {} steps (E0 = {:.9e})",
        sim.len(),
        steps,
        baseline.energy
    );

    for _ in 0..steps {
        sim.step()?;
        if report_every > 0 && sim.step_count() % report_every == 0 {
            let report = baseline.check(sim);
            info!(
                "step {:6}  E = {:.9e}  dE/E0 = {:.3e}  |dp| = {:.3e}",
                report.step,
                report.energy,
                report.energy_error,
                report.momentum_error.norm()
            );
        }
    }

    println!("step {} (t = {})", sim.step_count(), sim.elapsed_time());
    for (i, x) in sim.positions().iter().enumerate() {
        println!("{i:4} {:+.9e} {:+.9e} {:+.9e}", x.x, x.y, x.z);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity()?;
        bench_step()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let steps = args.steps.unwrap_or(scenario_cfg.parameters.steps);

    if args.parallel {
        let scenario = Scenario::build_with(scenario_cfg, ParallelNewtonianGravity)?;
        run(scenario, steps, args.report_every)
    } else {
        let scenario = Scenario::build_with(scenario_cfg, NewtonianGravity)?;
        run(scenario, steps, args.report_every)
    }
}
