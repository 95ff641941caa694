//! Spherical world model: radius, latitude/longitude conversion, and
//! elevation lookup.
//!
//! The world is a sphere centered at the origin. Positions are world-frame
//! [`DVec3`] values measured from the center, so a point's distance from the
//! origin minus the surface radius is its altitude. Latitude/longitude use
//! the usual spherical convention: latitude = arcsin(y), longitude =
//! atan2(z, x), both in degrees.

mod elevation;

use std::fmt;

use glam::DVec3;

pub use elevation::{ElevationError, ElevationMap};

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLong {
    /// Latitude in degrees. Range: \[-90, 90\]. Positive = north.
    pub lat: f64,
    /// Longitude in degrees. Range: (-180, 180\]. Positive = east.
    pub long: f64,
}

impl LatLong {
    /// Create a new latitude/longitude pair.
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

impl fmt::Display for LatLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.lat >= 0.0 { "N" } else { "S" };
        let long_dir = if self.long >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.2}\u{00B0}{}, {:.2}\u{00B0}{}",
            self.lat.abs(),
            lat_dir,
            self.long.abs(),
            long_dir,
        )
    }
}

/// The spherical world vehicles fly over.
///
/// Owns the surface radius and an optional [`ElevationMap`] for terrain
/// height queries. Everything else about the world (meshes, lighting,
/// atmosphere) belongs to the rendering layer and is not modeled here.
#[derive(Debug)]
pub struct World {
    /// Surface radius in world units. Distance-from-center == radius means
    /// a vehicle is on the ground.
    pub radius: f64,
    elevation: Option<ElevationMap>,
}

impl World {
    /// Create a world with the given surface radius and no elevation data.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            elevation: None,
        }
    }

    /// Attach an elevation map for `elevation_at` queries.
    pub fn with_elevation(mut self, elevation: ElevationMap) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Convert latitude/longitude (degrees) to a position on the surface.
    pub fn lat_long_to_world(&self, lat: f64, long: f64) -> DVec3 {
        let lat_rad = lat.to_radians();
        let long_rad = long.to_radians();
        DVec3::new(
            lat_rad.cos() * long_rad.cos(),
            lat_rad.sin(),
            lat_rad.cos() * long_rad.sin(),
        ) * self.radius
    }

    /// Convert a world-frame position to latitude/longitude (degrees).
    ///
    /// A position at (or numerically indistinguishable from) the world
    /// center maps to (0, 0) rather than propagating NaN.
    pub fn cartesian_to_lat_long(&self, position: DVec3) -> LatLong {
        let distance = position.length();
        if distance < 1e-10 {
            return LatLong::new(0.0, 0.0);
        }
        let dir = position / distance;
        LatLong::new(dir.y.asin().to_degrees(), dir.z.atan2(dir.x).to_degrees())
    }

    /// Position at the given latitude/longitude, `altitude` units above the
    /// surface.
    pub fn surface_position(&self, lat: f64, long: f64, altitude: f64) -> DVec3 {
        let surface = self.lat_long_to_world(lat, long);
        surface * ((self.radius + altitude) / self.radius)
    }

    /// Altitude of a world-frame position above the surface radius.
    pub fn altitude_of(&self, position: DVec3) -> f64 {
        position.length() - self.radius
    }

    /// Terrain elevation at the given latitude/longitude, or `None` when no
    /// elevation data is loaded or the map is empty.
    pub fn elevation_at(&self, lat: f64, long: f64) -> Option<f64> {
        self.elevation.as_ref()?.elevation_at(lat, long)
    }
}
