use crate::config::{MissionConfig, MissionParameters};
use crate::constellation::{ConstellationBuilder, ConstellationTracks};
use crate::errors::MissionErrors;
use crate::rendering::{map_title, CsvGroundTrackSink, GroundTrackSink, SvgMapSink};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

pub const CSV_FILE: &str = "ground_tracks.csv";
pub const SVG_FILE: &str = "ground_tracks.svg";

/// Files produced by a successful run.
#[derive(Debug, Clone)]
pub struct RunOutputs {
    pub tracks: ConstellationTracks,
    pub csv_path: PathBuf,
    pub svg_path: PathBuf,
}

/// Validates `config`, propagates the whole constellation and renders the ground tracks.
///
/// Nothing is written unless every satellite propagated, or failures are configured to be skipped.
pub fn run(config: &MissionConfig) -> Result<RunOutputs, MissionErrors> {
    let params = config.validate()?;
    log_parameters(&params);

    let tracks = ConstellationBuilder::new(&params).build()?;
    if !tracks.skipped.is_empty() {
        let skipped: Vec<String> = tracks.skipped.iter().map(|f| f.satellite.label()).collect();
        warn!(
            "{} of {} satellites skipped: {}",
            skipped.len(),
            params.satellite_count,
            skipped.join(", ")
        );
    }

    fs::create_dir_all(&config.output_dir)?;
    let title = map_title(params.span_periods, params.satellite_count);

    let csv_path = config.output_dir.join(CSV_FILE);
    CsvGroundTrackSink::create(&csv_path, params.start_epoch)?.render(&title, &tracks.series)?;
    info!("Ground-track samples written to {}", csv_path.display());

    let svg_path = config.output_dir.join(SVG_FILE);
    SvgMapSink::new(&svg_path).render(&title, &tracks.series)?;
    info!("Ground-track map written to {}", svg_path.display());

    Ok(RunOutputs {
        tracks,
        csv_path,
        svg_path,
    })
}

fn log_parameters(params: &MissionParameters) {
    info!(
        "{} satellites, a = {:.0} m, i = {:.2}°, T = {:.1} s",
        params.satellite_count,
        params.semi_major_axis,
        params.inclination.to_degrees(),
        params.period
    );
    info!(
        "Integrating {:.1} s from {} with {} output samples over the first {:.1} s",
        params.span.1 - params.span.0,
        params.start_epoch,
        params.output_times.len(),
        params.output_times.last().copied().unwrap_or(0.0)
    );
    info!("Integrator: {}", params.integrator);
}
