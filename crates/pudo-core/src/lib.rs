//! Nearest-neighbor join of vendors to PUDO collection points.
//!
//! The join runs in two stages. A k-d tree over raw (latitude, longitude)
//! degrees picks the planar-nearest PUDO for each vendor, then the haversine
//! distance to that PUDO decides whether the pair is kept.
//!
//! # Example
//!
//! ```
//! use pudo_core::join;
//! use pudo_model::{Coordinate, JoinOptions, SourceRecord, TargetRecord};
//!
//! let targets = vec![TargetRecord::new(Coordinate::new(-23.55, -46.63))];
//! let sources = vec![SourceRecord::new("V1", Coordinate::new(-23.56, -46.64))];
//!
//! let joined = join(&sources, &targets, &JoinOptions::default()).unwrap();
//! assert_eq!(joined.len(), 1);
//! assert!(joined[0].distance_km < 2.0);
//! ```

pub mod distance;
mod error;
pub mod index;
pub mod join;
pub mod text;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use error::{JoinError, Result};
pub use index::SpatialIndex;
pub use join::{
    JoinEngine, JoinObserver, JoinOutput, JoinStats, NearestTarget, NoopObserver, join,
    join_with_observer,
};
pub use text::{normalize_optional, normalize_text};
