//! Spatial references and the WGS84 → Web Mercator projection.
//!
//! The feature layer is stored in Web Mercator and does not always reproject a
//! geographic input point on its side, so the area query falls back to
//! sending pre-projected coordinates.

use std::f64::consts::PI;

use serde::Serialize;

/// Half the equatorial circumference of the spherical Mercator, in meters.
const ORIGIN_SHIFT: f64 = 20_037_508.34;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialReference {
    /// Geographic longitude/latitude in degrees.
    Wgs84,
    /// Spherical Web Mercator in meters.
    WebMercator,
}

impl SpatialReference {
    #[must_use]
    pub fn wkid(self) -> u32 {
        match self {
            SpatialReference::Wgs84 => 4326,
            SpatialReference::WebMercator => 102_100,
        }
    }
}

/// Point payload for the `geometry` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointGeometry {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "spatialReference")]
    pub spatial_reference: Wkid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wkid {
    pub wkid: u32,
}

impl PointGeometry {
    #[must_use]
    pub fn new(x: f64, y: f64, reference: SpatialReference) -> Self {
        Self {
            x,
            y,
            spatial_reference: Wkid {
                wkid: reference.wkid(),
            },
        }
    }
}

/// Projects WGS84 degrees onto spherical Web Mercator meters.
#[must_use]
pub fn lon_lat_to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon * ORIGIN_SHIFT / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    let y = y * ORIGIN_SHIFT / 180.0;
    (x, y)
}

/// Inverse of [`lon_lat_to_web_mercator`].
#[must_use]
pub fn web_mercator_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 180.0 / ORIGIN_SHIFT;
    let y_deg = y * 180.0 / ORIGIN_SHIFT;
    let lat = (y_deg * PI / 180.0).exp().atan() * 360.0 / PI - 90.0;
    (lon, lat)
}
