//! Configuration options for a join run.

use serde::{Deserialize, Serialize};

/// Default maximum vendor to PUDO distance, in kilometers.
pub const DEFAULT_THRESHOLD_KM: f64 = 900.5;

/// Options controlling the nearest-neighbor join.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JoinOptions {
    /// Maximum great-circle distance (km) for a pair to be emitted.
    ///
    /// The comparison is inclusive: a pair exactly at the threshold qualifies.
    pub threshold_km: f64,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            threshold_km: DEFAULT_THRESHOLD_KM,
        }
    }
}

impl JoinOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance threshold in kilometers.
    #[must_use]
    pub fn with_threshold_km(mut self, threshold_km: f64) -> Self {
        self.threshold_km = threshold_km;
        self
    }
}
