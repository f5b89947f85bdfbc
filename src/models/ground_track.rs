/// Sub-satellite point at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTrackPoint {
    pub time: f64,      // Seconds since the mission epoch
    pub longitude: f64, // Earth-fixed, degrees in (-180, 180]
    pub latitude: f64,  // Geocentric, degrees in [-90, 90]
}

/// One member of an evenly phased constellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteDescriptor {
    pub index: usize,
    pub raan: f64,        // Right ascension of the ascending node (rad)
    pub inclination: f64, // rad
}

impl SatelliteDescriptor {
    /// Places satellite `index` of `count` at a node angle of `index * 360 / count` degrees.
    pub fn evenly_spaced(index: usize, count: usize, inclination: f64) -> Self {
        let raan_deg = index as f64 * 360.0 / count as f64;
        SatelliteDescriptor {
            index,
            raan: raan_deg.to_radians(),
            inclination,
        }
    }

    /// 1-based name used in legends and logs.
    pub fn label(&self) -> String {
        format!("Satellite {}", self.index + 1)
    }
}

/// Ordered ground track of a single satellite.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTrackSeries {
    pub satellite: SatelliteDescriptor,
    pub points: Vec<GroundTrackPoint>,
}

impl GroundTrackSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.latitude)
    }
}
