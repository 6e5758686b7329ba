//! Command-line driver for tpa.
//!
//! - `args`: clap argument definitions
//! - `config`: `tpa.json` loading and merging with CLI flags
//! - `driver_sources`: source discovery and file reading
//! - `driver`: builds the compilation, runs the analyzer, applies fixes
//! - `reporter`: text and JSON output

pub mod args;
pub mod config;
pub mod driver;
pub mod driver_sources;
pub mod reporter;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "../tests/driver_sources_tests.rs"]
mod driver_sources_tests;

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
