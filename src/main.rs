use solsim::{IntegratorKind, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in `scenarios/`
    #[arg(short, default_value = "sun_earth.yaml")]
    file_name: String,

    /// Override the number of steps from the scenario
    #[arg(long)]
    steps: Option<usize>,

    /// Override the integrator: leapfrog or euler_cromer
    #[arg(long, value_enum)]
    integrator: Option<IntegratorKind>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(steps) = args.steps {
        scenario_cfg.parameters.num_steps = steps;
    }
    if let Some(kind) = args.integrator {
        scenario_cfg.engine.integrator = kind;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    info!(
        "{}: {} bodies, {} x {} s, {} / {:?}",
        args.file_name,
        scenario.bodies.len(),
        scenario.parameters().num_steps,
        scenario.parameters().dt,
        scenario.engine().integrator_name(),
        scenario.policy()
    );

    let summary = scenario.run()?;

    for body in &scenario.bodies {
        let start = body.trajectory().first().copied().unwrap_or(body.x);
        info!(
            "{:<20} points = {:6}  final = [{:.4e}, {:.4e}, {:.4e}] m  |last - first| = {:.4e} m",
            body.name(),
            body.trajectory().len(),
            body.x.x,
            body.x.y,
            body.x.z,
            (body.x - start).norm()
        );
    }
    info!(
        "t = {:.3e} s after {} steps, total energy {:.6e} -> {:.6e} J (drift {:.3e})",
        summary.t,
        summary.steps,
        summary.initial_energy,
        summary.final_energy,
        summary.energy_drift()
    );

    Ok(())
}
