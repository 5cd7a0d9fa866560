//! # Round-Trip Verification Harness
//!
//! `JsonBenchmark` runs every library through one `Bench` and checks each
//! result against a canonical reference payload built once per harness.
//!
//! ## Per-Library State Machine
//!
//! ```text
//! inactive? ──yes──> Skipped(Inactive)
//!    │ no
//!    v
//! produce ──Err──> Failed(message)
//!    │
//!    ├── None, unsupported ──> Skipped(Unsupported)
//!    ├── None, supported ────> Failed
//!    ├── Some, unsupported ──> Failed
//!    v
//! shape == registered shape? ──no──> Failed
//!    │ yes
//!    v
//! decode (reference parser for text and trees) ──Err──> Failed
//!    │
//!    v
//! equal to reference? ──no──> Failed
//!    │ yes
//!    v
//! Passed
//! ```
//!
//! Each library runs `iterations` times; the first failure ends its test.
//!
//! ## Usage
//!
//! ```ignore
//! let harness = JsonBenchmark::<Users>::from_config(&BenchConfig::from_env()?, Api::Serialize)?;
//! let report = harness.run_all();
//! println!("{}", report);
//! assert!(report.is_success());
//! ```

use std::fmt;

use eyre::{bail, ensure, Result};
use log::{debug, info, warn};

use crate::bench::{Bench, JsonBench};
use crate::codec::{self, Api, Library, Output};
use crate::config::{BenchConfig, ITERATIONS};
use crate::model::Dataset;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The registry declares the library cannot perform the API.
    Unsupported,
    /// The library is disabled for this run.
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Skipped(SkipReason),
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => f.write_str("passed"),
            Outcome::Skipped(SkipReason::Unsupported) => f.write_str("skipped (unsupported)"),
            Outcome::Skipped(SkipReason::Inactive) => f.write_str("skipped (inactive)"),
            Outcome::Failed(message) => write!(f, "FAILED: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryResult {
    pub lib: Library,
    pub api: Api,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    results: Vec<LibraryResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lib: Library, api: Api, outcome: Outcome) {
        self.results.push(LibraryResult { lib, api, outcome });
    }

    /// Appends every result of `other`.
    pub fn merge(&mut self, other: Report) {
        self.results.extend(other.results);
    }

    pub fn results(&self) -> &[LibraryResult] {
        &self.results
    }

    pub fn outcome(&self, lib: Library, api: Api) -> Option<&Outcome> {
        self.results
            .iter()
            .find(|r| r.lib == lib && r.api == api)
            .map(|r| &r.outcome)
    }

    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Passed)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Skipped(_)))
            .count()
    }

    pub fn failures(&self) -> Vec<&LibraryResult> {
        self.results
            .iter()
            .filter(|r| r.outcome.is_failure())
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| !r.outcome.is_failure())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.results {
            writeln!(f, "{:<18} {:<12} {}", r.lib.name(), r.api, r.outcome)?;
        }
        write!(
            f,
            "{} passed, {} skipped, {} failed",
            self.passed(),
            self.skipped(),
            self.failures().len()
        )
    }
}

pub struct JsonBenchmark<T, B = JsonBench<T>> {
    bench: B,
    reference: T,
    iterations: usize,
}

impl<T: Dataset> JsonBenchmark<T, JsonBench<T>> {
    /// Builds a harness over a single-sample source so every call sees the
    /// reference payload.
    pub fn from_config(config: &BenchConfig, api: Api) -> Result<Self> {
        let single = config.clone().quantity(1);
        let bench = JsonBench::<T>::from_config(&single, api)?;
        let reference = bench.source().canonical().clone();
        Self::new(bench, reference, config.get_iterations())
    }
}

impl<T: Dataset, B: Bench<T>> JsonBenchmark<T, B> {
    pub fn new(bench: B, reference: T, iterations: usize) -> Result<Self> {
        ensure!(iterations > 0, "iterations must be at least 1");
        Ok(Self {
            bench,
            reference,
            iterations,
        })
    }

    pub fn with_default_iterations(bench: B, reference: T) -> Result<Self> {
        Self::new(bench, reference, ITERATIONS)
    }

    pub fn bench(&self) -> &B {
        &self.bench
    }

    pub fn reference(&self) -> &T {
        &self.reference
    }

    pub fn api(&self) -> Api {
        self.bench.api()
    }

    /// Runs `lib` up to `iterations` times, stopping at the first result
    /// that is not a pass.
    pub fn test(&self, lib: Library) -> Outcome {
        let api = self.api();
        if self.bench.support().is_registered(lib) && !self.bench.support().is_active(lib) {
            debug!("{} {}: skipped, library inactive", lib, api);
            return Outcome::Skipped(SkipReason::Inactive);
        }

        let mut outcome = Outcome::Passed;
        for iteration in 0..self.iterations {
            outcome = self.check(lib);
            match &outcome {
                Outcome::Passed => continue,
                Outcome::Skipped(reason) => {
                    debug!("{} {}: skipped ({:?})", lib, api, reason);
                    return outcome;
                }
                Outcome::Failed(message) => {
                    warn!(
                        "{} {}: failed on iteration {}: {}",
                        lib,
                        api,
                        iteration + 1,
                        message
                    );
                    return outcome;
                }
            }
        }

        info!("{} {}: passed {} iterations", lib, api, self.iterations);
        outcome
    }

    /// Tests every library and collects the outcomes.
    pub fn run_all(&self) -> Report {
        let mut report = Report::new();
        for lib in Library::ALL {
            report.push(lib, self.api(), self.test(lib));
        }
        report
    }

    fn check(&self, lib: Library) -> Outcome {
        let api = self.api();
        let supported = self.bench.support().supports(lib, api);

        match self.bench.produce(lib) {
            Err(e) => Outcome::Failed(format!("{:#}", e)),
            Ok(None) if !supported => Outcome::Skipped(SkipReason::Unsupported),
            Ok(None) => Outcome::Failed(format!(
                "{} returned no output for supported api {}",
                lib, api
            )),
            Ok(Some(output)) if !supported => Outcome::Failed(format!(
                "{} produced {} for unsupported api {}",
                lib,
                output.shape(),
                api
            )),
            Ok(Some(output)) => match self.verify(lib, output) {
                Ok(()) => Outcome::Passed,
                Err(e) => Outcome::Failed(format!("{:#}", e)),
            },
        }
    }

    fn verify(&self, lib: Library, output: Output<T>) -> Result<()> {
        let api = self.api();
        let expected = lib.shape(api);
        ensure!(
            output.shape() == expected,
            "{} {} produced {}, registered shape is {}",
            lib,
            api,
            output.shape(),
            expected
        );

        let value: T = match output {
            Output::Object(value) => value,
            Output::ProtoMessage(message) => T::from_proto(message)?,
            Output::JsonTree(tree) => codec::from_tree(tree)?,
            Output::Text(text) => codec::reference_parse(&text)?,
            Output::Binary(format, bytes) => codec::decode(format, &bytes)?,
        };

        if value != self.reference {
            bail!(
                "{} {} result differs from the reference payload ({} vs {} records)",
                lib,
                api,
                value.len(),
                self.reference.len()
            );
        }
        Ok(())
    }
}
