//! Output of the joined vendor to PUDO table.

pub mod error;
pub mod frame;
pub mod writer;

pub use error::{OutputError, Result};
pub use frame::joined_frame;
pub use writer::write_csv;
