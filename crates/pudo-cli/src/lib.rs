//! Library components of the `pudo-join` CLI.

pub mod logging;
pub mod pipeline;
pub mod progress;
