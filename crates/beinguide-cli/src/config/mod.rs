//! Application configuration module.
//!
//! Builds the run settings once from the command line, together with
//! the static channel display-name table.

#[allow(clippy::module_inception)]
mod config;
mod names;

#[allow(clippy::module_name_repetitions)]
pub use config::{DEFAULT_DAYS, GuideConfig};
