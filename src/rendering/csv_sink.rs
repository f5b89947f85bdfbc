use super::render_errors::RenderErrors;
use super::GroundTrackSink;
use crate::models::GroundTrackSeries;
use csv::Writer;
use hifitime::{Duration, Epoch};
use std::fs::File;
use std::io;
use std::path::Path;

/// Writes every ground-track point as one CSV row.
pub struct CsvGroundTrackSink<W: io::Write> {
    writer: Writer<W>,
    start_epoch: Epoch,
}

impl CsvGroundTrackSink<File> {
    pub fn create<P: AsRef<Path>>(path: P, start_epoch: Epoch) -> Result<Self, RenderErrors> {
        let file = File::create(path)?;
        Ok(Self::from_writer(file, start_epoch))
    }
}

impl<W: io::Write> CsvGroundTrackSink<W> {
    pub fn from_writer(inner: W, start_epoch: Epoch) -> Self {
        CsvGroundTrackSink {
            writer: Writer::from_writer(inner),
            start_epoch,
        }
    }

    pub fn into_inner(self) -> Result<W, RenderErrors> {
        self.writer
            .into_inner()
            .map_err(|e| RenderErrors::IoError(e.into_error()))
    }
}

impl<W: io::Write> GroundTrackSink for CsvGroundTrackSink<W> {
    fn render(&mut self, _title: &str, tracks: &[GroundTrackSeries]) -> Result<(), RenderErrors> {
        self.writer.write_record([
            "Satellite",
            "UTC Time",
            "Time (s)",
            "Longitude (deg)",
            "Latitude (deg)",
        ])?;

        for series in tracks {
            let satellite = (series.satellite.index + 1).to_string();
            for point in &series.points {
                let epoch = self.start_epoch + Duration::from_seconds(point.time);
                self.writer.write_record(&[
                    satellite.clone(),
                    epoch.to_string(),
                    point.time.to_string(),
                    point.longitude.to_string(),
                    point.latitude.to_string(),
                ])?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}
