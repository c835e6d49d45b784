use std::fmt;

use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in decimal degrees.
///
/// Both components are expected to be finite; ingest drops rows that are not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate only when both components are finite.
    pub fn try_new(latitude: f64, longitude: f64) -> Option<Self> {
        let coordinate = Self::new(latitude, longitude);
        coordinate.is_finite().then_some(coordinate)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Raw degrees as a planar point, latitude first.
    pub fn as_array(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
