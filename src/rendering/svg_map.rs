use super::render_errors::RenderErrors;
use super::GroundTrackSink;
use crate::models::{GroundTrackPoint, GroundTrackSeries};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Legend rows drawn at most; further tracks are plotted unlabeled.
pub const MAX_LEGEND_ENTRIES: usize = 15;

const MAP_SIZE: (u32, u32) = (1520, 860);

const OCEAN: RGBColor = RGBColor(0xd4, 0xe6, 0xf1);

// Categorical line colors, cycled by satellite index
const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Equirectangular (plate carrée) world map saved as SVG, one line per ground track.
pub struct SvgMapSink {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgMapSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        SvgMapSink {
            path: path.as_ref().to_path_buf(),
            size: MAP_SIZE,
        }
    }
}

impl GroundTrackSink for SvgMapSink {
    fn render(&mut self, title: &str, tracks: &[GroundTrackSeries]) -> Result<(), RenderErrors> {
        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        draw_ground_tracks(&root, title, tracks)?;
        root.present()?;
        Ok(())
    }
}

/// Draws the map, the tracks and the legend onto any plotters drawing area.
///
/// Tracks are split where they cross the antimeridian so no segment spans the whole map.
pub fn draw_ground_tracks<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    tracks: &[GroundTrackSeries],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-180.0..180.0, -90.0..90.0)?;

    chart.plotting_area().fill(&OCEAN)?;
    chart
        .configure_mesh()
        .x_labels(13)
        .y_labels(7)
        .x_label_formatter(&|lon| format!("{:.0}°", lon))
        .y_label_formatter(&|lat| format!("{:.0}°", lat))
        .x_desc("Longitude")
        .y_desc("Latitude")
        .light_line_style(&TRANSPARENT)
        .bold_line_style(&BLACK.mix(0.2))
        .draw()?;

    // Equator and prime meridian
    let guide = BLACK.mix(0.5);
    chart.draw_series(LineSeries::new(vec![(-180.0, 0.0), (180.0, 0.0)], &guide))?;
    chart.draw_series(LineSeries::new(vec![(0.0, -90.0), (0.0, 90.0)], &guide))?;

    for (row, series) in tracks.iter().enumerate() {
        let color = PALETTE[series.satellite.index % PALETTE.len()];
        let segments = split_at_antimeridian(&series.points);
        for (n, segment) in segments.into_iter().enumerate() {
            let line = chart.draw_series(LineSeries::new(
                segment.iter().map(|p| (p.longitude, p.latitude)),
                color.stroke_width(1),
            ))?;
            if n == 0 && row < MAX_LEGEND_ENTRIES {
                line.label(series.satellite.label()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }
    }

    if !tracks.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("sans-serif", 12))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

/// Breaks a track wherever consecutive longitudes jump by more than half a turn.
pub fn split_at_antimeridian(points: &[GroundTrackPoint]) -> Vec<&[GroundTrackPoint]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..points.len() {
        if (points[i].longitude - points[i - 1].longitude).abs() > 180.0 {
            segments.push(&points[start..i]);
            start = i;
        }
    }
    if start < points.len() {
        segments.push(&points[start..]);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SatelliteDescriptor;

    fn point(longitude: f64) -> GroundTrackPoint {
        GroundTrackPoint {
            time: 0.0,
            longitude,
            latitude: 0.0,
        }
    }

    fn series(index: usize, count: usize, longitudes: &[f64]) -> GroundTrackSeries {
        GroundTrackSeries {
            satellite: SatelliteDescriptor::evenly_spaced(index, count, 0.0),
            points: longitudes.iter().map(|lon| point(*lon)).collect(),
        }
    }

    fn render_to_string(title: &str, tracks: &[GroundTrackSeries]) -> String {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, MAP_SIZE).into_drawing_area();
            draw_ground_tracks(&root, title, tracks).unwrap();
            root.present().unwrap();
        }
        svg
    }

    #[test]
    fn tracks_break_at_the_seam() {
        let points: Vec<GroundTrackPoint> = [170.0, 178.0, -176.0, -170.0, -160.0]
            .iter()
            .map(|lon| point(*lon))
            .collect();
        let segments = split_at_antimeridian(&points);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1].len(), 3);
    }

    #[test]
    fn continuous_track_is_one_segment() {
        let points: Vec<GroundTrackPoint> = (0..10).map(|i| point(i as f64 * 10.0)).collect();
        assert_eq!(split_at_antimeridian(&points).len(), 1);
        assert!(split_at_antimeridian(&[]).is_empty());
    }

    #[test]
    fn map_has_title_and_capped_legend() {
        let tracks: Vec<GroundTrackSeries> = (0..17)
            .map(|k| series(k, 17, &[-10.0, 0.0, 10.0]))
            .collect();
        let svg = render_to_string("Ground tracks (3 orbits, 17 satellites)", &tracks);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Ground tracks (3 orbits, 17 satellites)"));
        assert!(svg.contains("Satellite 15"));
        assert!(!svg.contains("Satellite 16"));
        assert!(!svg.contains("Satellite 17"));
        assert_eq!(svg.matches("Satellite ").count(), MAX_LEGEND_ENTRIES);
    }

    #[test]
    fn seam_crossing_adds_one_line() {
        let continuous = render_to_string("map", &[series(0, 1, &[160.0, 170.0, 175.0, 178.0])]);
        let crossing = render_to_string("map", &[series(0, 1, &[170.0, 178.0, -176.0, -170.0])]);
        assert_eq!(
            crossing.matches("<polyline").count(),
            continuous.matches("<polyline").count() + 1
        );
    }

    #[test]
    fn empty_constellation_still_draws_the_map() {
        let svg = render_to_string("Ground tracks (1 orbits, 0 satellites)", &[]);
        assert!(svg.contains("Ground tracks (1 orbits, 0 satellites)"));
        assert!(!svg.contains("Satellite "));
    }

    #[test]
    fn render_writes_the_file() {
        let path = std::env::temp_dir().join("groundtrack_svg_map_render.svg");
        let tracks = vec![series(0, 1, &[-20.0, 0.0, 20.0])];
        SvgMapSink::new(&path).render("Ground tracks", &tracks).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Satellite 1"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_path_is_a_plot_error() {
        let path = std::env::temp_dir()
            .join("groundtrack_missing_dir")
            .join("nested")
            .join("map.svg");
        let result = SvgMapSink::new(&path).render("Ground tracks", &[]);
        assert!(matches!(result, Err(RenderErrors::PlotError(_))));
    }
}
