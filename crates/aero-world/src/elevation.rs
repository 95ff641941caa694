//! Nearest-sample elevation lookup over a sparse lat/long point set.
//!
//! Elevation data ships as a JSON array of sample points distributed over
//! the sphere (a Fibonacci lattice in the stock data set). Queries return
//! the elevation of the nearest sample in lat/long space, scaled down to
//! world units.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Divisor applied to raw sample elevations (meters) to bring them onto the
/// simulation's world scale.
const ELEVATION_UNIT_SCALE: f64 = 1000.0;

/// One elevation sample from the data file.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ElevationSample {
    /// Sample latitude in degrees.
    pub latitude: f64,
    /// Sample longitude in degrees.
    pub longitude: f64,
    /// Raw elevation in meters.
    pub elevation: f64,
}

/// Errors that can occur when loading elevation data.
#[derive(Debug, thiserror::Error)]
pub enum ElevationError {
    /// Failed to read the data file from disk.
    #[error("failed to read elevation data: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse the JSON content.
    #[error("failed to parse elevation data: {0}")]
    ParseError(#[source] serde_json::Error),
}

/// A loaded set of elevation samples supporting nearest-point queries.
#[derive(Debug, Default)]
pub struct ElevationMap {
    samples: Vec<ElevationSample>,
}

impl ElevationMap {
    /// Build a map from already-parsed samples.
    pub fn from_samples(samples: Vec<ElevationSample>) -> Self {
        Self { samples }
    }

    /// Load samples from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, ElevationError> {
        let raw = fs::read_to_string(path).map_err(ElevationError::ReadError)?;
        let samples: Vec<ElevationSample> =
            serde_json::from_str(&raw).map_err(ElevationError::ParseError)?;
        Ok(Self { samples })
    }

    /// Number of loaded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the map holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Elevation (world units) of the sample nearest to the given
    /// latitude/longitude, or `None` for an empty map.
    ///
    /// Nearest is measured as Euclidean distance in degree space; the stock
    /// lattice is dense enough that the distortion near the poles does not
    /// matter for terrain flavor.
    pub fn elevation_at(&self, lat: f64, long: f64) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None;
        for sample in &self.samples {
            let dlat = sample.latitude - lat;
            let dlong = sample.longitude - long;
            let dist_sq = dlat * dlat + dlong * dlong;
            match best {
                Some((best_dist, _)) if dist_sq >= best_dist => {}
                _ => best = Some((dist_sq, sample.elevation)),
            }
        }
        best.map(|(_, elevation)| elevation / ELEVATION_UNIT_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample(latitude: f64, longitude: f64, elevation: f64) -> ElevationSample {
        ElevationSample {
            latitude,
            longitude,
            elevation,
        }
    }

    #[test]
    fn test_empty_map_returns_none() {
        let map = ElevationMap::default();
        assert_eq!(map.elevation_at(0.0, 0.0), None);
    }

    #[test]
    fn test_nearest_sample_wins() {
        let map = ElevationMap::from_samples(vec![
            sample(0.0, 0.0, 100.0),
            sample(10.0, 10.0, 500.0),
            sample(-40.0, 90.0, 2000.0),
        ]);
        assert_eq!(map.elevation_at(1.0, 1.0), Some(0.1));
        assert_eq!(map.elevation_at(9.0, 11.0), Some(0.5));
        assert_eq!(map.elevation_at(-45.0, 85.0), Some(2.0));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"latitude": 5.0, "longitude": -5.0, "elevation": 250.0}}]"#
        )
        .unwrap();
        let map = ElevationMap::load(file.path()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.elevation_at(5.0, -5.0), Some(0.25));
    }

    #[test]
    fn test_load_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ElevationMap::load(file.path()),
            Err(ElevationError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(matches!(
            ElevationMap::load(Path::new("/nonexistent/elevation.json")),
            Err(ElevationError::ReadError(_))
        ));
    }
}
