//! # Benchmark Configuration
//!
//! `BenchConfig` holds the runtime settings of a benchmark run: how large each
//! generated payload is, how many distinct payloads a source rotates through,
//! the generator seed, the number of verification iterations, and which
//! libraries are active.
//!
//! ## Configuration Options
//!
//! | Option     | Default                   | Environment              |
//! |------------|---------------------------|--------------------------|
//! | payload_kb | `DEFAULT_PAYLOAD_KB` (1)  | `JSONBENCH_SIZE_KB`      |
//! | quantity   | `DEFAULT_SOURCE_QUANTITY` | `JSONBENCH_QUANTITY`     |
//! | seed       | `DEFAULT_SEED`            | `JSONBENCH_SEED`         |
//! | iterations | `ITERATIONS` (3)          | `JSONBENCH_ITERATIONS`   |
//! | libraries  | all                       | `JSONBENCH_LIBS`         |
//!
//! `JSONBENCH_LIBS` is a comma-separated list of library names, for example
//! `serde_json,flatbuffers`.
//!
//! ## Usage
//!
//! ```ignore
//! let config = BenchConfig::new()
//!     .payload_kb(10)
//!     .libraries([Library::SerdeJson, Library::FlatBuffers]);
//!
//! let config = BenchConfig::from_env()?;
//! ```

use std::str::FromStr;

use eyre::{ensure, Result, WrapErr};
use log::debug;

use crate::codec::Library;
use crate::config::constants::{
    DEFAULT_PAYLOAD_KB, DEFAULT_SEED, DEFAULT_SOURCE_QUANTITY, ENV_ITERATIONS, ENV_LIBS,
    ENV_QUANTITY, ENV_SEED, ENV_SIZE_KB, ITERATIONS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    payload_kb: usize,
    quantity: usize,
    seed: u64,
    iterations: usize,
    libraries: Option<Vec<Library>>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self {
            payload_kb: DEFAULT_PAYLOAD_KB,
            quantity: DEFAULT_SOURCE_QUANTITY,
            seed: DEFAULT_SEED,
            iterations: ITERATIONS,
            libraries: None,
        }
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, starting from the defaults.
    ///
    /// Unset keys keep their default. A set key that fails to parse is an error
    /// rather than being ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(ENV_SIZE_KB) {
            config = config.payload_kb(parse_var(ENV_SIZE_KB, &raw)?);
        }
        if let Some(raw) = lookup(ENV_QUANTITY) {
            config = config.quantity(parse_var(ENV_QUANTITY, &raw)?);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            config = config.seed(parse_var(ENV_SEED, &raw)?);
        }
        if let Some(raw) = lookup(ENV_ITERATIONS) {
            config = config.iterations(parse_var(ENV_ITERATIONS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_LIBS) {
            let libraries = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(Library::from_str)
                .collect::<Result<Vec<_>>>()
                .wrap_err_with(|| format!("invalid {}", ENV_LIBS))?;
            config = config.libraries(libraries);
        }

        config.validate()?;
        debug!("loaded benchmark config: {:?}", config);
        Ok(config)
    }

    /// Sets the target JSON size of each generated payload, in kilobytes.
    pub fn payload_kb(mut self, kb: usize) -> Self {
        self.payload_kb = kb;
        self
    }

    /// Sets how many distinct payloads a source pre-generates.
    pub fn quantity(mut self, quantity: usize) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many times the harness repeats each library round trip.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Limits the run to `libraries`. Every other library is reported as
    /// inactive.
    pub fn libraries<I>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = Library>,
    {
        self.libraries = Some(libraries.into_iter().collect());
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.payload_kb > 0, "payload size must be at least 1 KB");
        ensure!(
            self.payload_kb.checked_mul(1024).is_some(),
            "payload size of {} KB overflows a byte count",
            self.payload_kb
        );
        ensure!(self.quantity > 0, "source quantity must be at least 1");
        ensure!(self.iterations > 0, "iterations must be at least 1");
        if let Some(libraries) = &self.libraries {
            ensure!(!libraries.is_empty(), "library selection cannot be empty");
        }
        Ok(())
    }

    pub fn target_bytes(&self) -> usize {
        self.payload_kb.saturating_mul(1024)
    }

    pub fn get_payload_kb(&self) -> usize {
        self.payload_kb
    }

    pub fn get_quantity(&self) -> usize {
        self.quantity
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    pub fn get_iterations(&self) -> usize {
        self.iterations
    }

    pub fn selected_libraries(&self) -> Option<&[Library]> {
        self.libraries.as_deref()
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .wrap_err_with(|| format!("invalid value '{}' for {}", raw, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_constants() {
        let config = BenchConfig::new();
        assert_eq!(config.get_payload_kb(), DEFAULT_PAYLOAD_KB);
        assert_eq!(config.get_quantity(), DEFAULT_SOURCE_QUANTITY);
        assert_eq!(config.get_seed(), DEFAULT_SEED);
        assert_eq!(config.get_iterations(), ITERATIONS);
        assert!(config.selected_libraries().is_none());
        assert_eq!(config.target_bytes(), DEFAULT_PAYLOAD_KB * 1024);
    }

    #[test]
    fn lookup_overrides_every_field() {
        let config = BenchConfig::from_lookup(lookup_from(&[
            (ENV_SIZE_KB, "10"),
            (ENV_QUANTITY, "2"),
            (ENV_SEED, "42"),
            (ENV_ITERATIONS, "5"),
            (ENV_LIBS, "serde_json, flatbuffers"),
        ]))
        .unwrap();

        assert_eq!(config.get_payload_kb(), 10);
        assert_eq!(config.get_quantity(), 2);
        assert_eq!(config.get_seed(), 42);
        assert_eq!(config.get_iterations(), 5);
        assert_eq!(
            config.selected_libraries(),
            Some(&[Library::SerdeJson, Library::FlatBuffers][..])
        );
    }

    #[test]
    fn lookup_rejects_unparseable_number() {
        let err = BenchConfig::from_lookup(lookup_from(&[(ENV_SIZE_KB, "big")])).unwrap_err();
        assert!(format!("{:#}", err).contains(ENV_SIZE_KB));
    }

    #[test]
    fn lookup_rejects_unknown_library() {
        let err = BenchConfig::from_lookup(lookup_from(&[(ENV_LIBS, "gson")])).unwrap_err();
        assert!(format!("{:#}", err).contains("gson"));
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        assert!(BenchConfig::new().quantity(0).validate().is_err());
        assert!(BenchConfig::new().iterations(0).validate().is_err());
        assert!(BenchConfig::new().payload_kb(0).validate().is_err());
    }

    #[test]
    fn lookup_rejects_overflowing_payload_size() {
        let huge = usize::MAX.to_string();
        let err =
            BenchConfig::from_lookup(lookup_from(&[(ENV_SIZE_KB, huge.as_str())])).unwrap_err();
        assert!(format!("{:#}", err).contains("overflows a byte count"));

        let config = BenchConfig::new().payload_kb(usize::MAX);
        assert!(config.validate().is_err());
        assert_eq!(config.target_bytes(), usize::MAX);
    }
}
