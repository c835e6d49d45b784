//! Data model for the vendor to PUDO nearest-neighbor join.
//!
//! Source records are vendors identified by a KYC id, target records are
//! PUDO (pick-up/drop-off) collection points. Both carry a [`Coordinate`].

pub mod columns;
pub mod coordinate;
pub mod options;
pub mod records;

pub use coordinate::Coordinate;
pub use options::{DEFAULT_THRESHOLD_KM, JoinOptions};
pub use records::{JoinedRecord, SourceRecord, TargetRecord};
