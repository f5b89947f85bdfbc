use groundtrack::config::MissionConfig;
use groundtrack::errors::MissionErrors;
use groundtrack::simulation;
use log::{error, info};
use std::env::{args, set_var, var};
use std::process::ExitCode;

const LOG_VAR: &str = "GROUNDTRACK_LOG";

fn main() -> ExitCode {
    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }
    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        eprintln!("could not init logger");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), MissionErrors> {
    // Optional scenario file, defaults otherwise
    let config = match args().nth(1) {
        Some(path) => {
            info!("Loading scenario `{}`", path);
            MissionConfig::from_yaml_file(&path)?
        }
        None => MissionConfig::default(),
    };

    let outputs = simulation::run(&config)?;
    info!(
        "Rendered {} ground tracks ({} skipped)",
        outputs.tracks.series.len(),
        outputs.tracks.skipped.len()
    );
    Ok(())
}
