//! Loading of the vendor and PUDO tables.
//!
//! Rows are read as text, coordinates are coerced to numbers and rows that
//! cannot take part in the join are dropped and counted:
//!
//! - vendors with a null or empty `kyc_id`,
//! - rows whose latitude or longitude is missing, unparseable or non-finite.

pub mod csv;
pub mod error;
pub mod polars_utils;
pub mod records;

pub use csv::read_csv_frame;
pub use error::{IngestError, Result};
pub use polars_utils::{
    any_to_f64, any_to_string, any_to_string_non_empty, any_to_string_opt, coerce_numeric,
};
pub use records::{
    DropCounts, LoadedTable, load_sources, load_sources_csv, load_targets, load_targets_csv,
};
