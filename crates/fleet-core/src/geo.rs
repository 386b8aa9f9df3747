//! Named locations and planar distance helpers.
//!
//! Coordinates are WGS-84 degrees stored as `f64`.  Distances inside the
//! simulator are deliberately planar: the city is small enough that treating
//! one degree as a fixed number of metres ([`METERS_PER_DEGREE`]) is an
//! acceptable approximation for the straight-line fallback and for
//! nearest-station lookup.

use std::fmt;

/// Approximate metres per degree used by the straight-line fallback.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// A geometry point in `[lng, lat]` order (the routing service wire order).
pub type LngLat = [f64; 2];

/// A named geographic point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self { lat, lng, address: address.into() }
    }

    /// Euclidean distance in degree space.
    #[inline]
    pub fn planar_distance(&self, other: &Location) -> f64 {
        let d_lat = other.lat - self.lat;
        let d_lng = other.lng - self.lng;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }

    /// Planar distance converted to metres (`Δdegrees × 111 000`).
    #[inline]
    pub fn straight_line_m(&self, other: &Location) -> f64 {
        self.planar_distance(other) * METERS_PER_DEGREE
    }

    /// This location as a `[lng, lat]` geometry point.
    #[inline]
    pub fn lng_lat(&self) -> LngLat {
        [self.lng, self.lat]
    }

    /// Move to `point`, keeping the address label.
    #[inline]
    pub fn set_lng_lat(&mut self, point: LngLat) {
        self.lng = point[0];
        self.lat = point[1];
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.6}, {:.6})", self.address, self.lat, self.lng)
    }
}
