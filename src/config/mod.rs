//! # jsonbench Configuration Module
//!
//! This module centralizes configuration for the benchmark: numeric constants
//! shared by the table codec and the harness, and `BenchConfig`, the runtime
//! settings for data generation and library selection.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation
//! - [`bench`]: `BenchConfig` builder and environment overrides

pub mod bench;
pub mod constants;

pub use bench::BenchConfig;
pub use constants::*;
