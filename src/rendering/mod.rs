pub mod csv_sink;
pub mod render_errors;
pub mod svg_map;

use crate::models::GroundTrackSeries;

pub use csv_sink::CsvGroundTrackSink;
pub use render_errors::RenderErrors;
pub use svg_map::SvgMapSink;

/// Consumer of a finished set of ground tracks.
pub trait GroundTrackSink {
    fn render(&mut self, title: &str, tracks: &[GroundTrackSeries]) -> Result<(), RenderErrors>;
}

pub fn map_title(span_periods: f64, satellite_count: usize) -> String {
    format!(
        "Ground tracks ({} orbits, {} satellites)",
        span_periods, satellite_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_names_span_and_count() {
        assert_eq!(map_title(122.0, 14), "Ground tracks (122 orbits, 14 satellites)");
        assert_eq!(map_title(1.5, 1), "Ground tracks (1.5 orbits, 1 satellites)");
    }
}
