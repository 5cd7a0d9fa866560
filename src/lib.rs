//! # jsonbench - Cross-Library Serialization Round-Trip Benchmark
//!
//! jsonbench round-trips a fixed data model through a set of serialization
//! libraries, verifies that every library reproduces the same payload, and
//! times the calls with criterion. It contains its own FlatBuffers-style
//! table codec:
//!
//! - **Zero-copy table access**: vtable lookups over a borrowed `&[u8]`
//! - **Back-to-front builder**: children first, vtables deduplicated
//! - **Explicit capabilities**: unsupported libraries are skipped by flag,
//!   never by guessing from a missing result
//!
//! ## Quick Start
//!
//! ```ignore
//! use jsonbench::{Api, BenchConfig, JsonBenchmark, Users};
//!
//! let config = BenchConfig::new().payload_kb(10);
//! let harness = JsonBenchmark::<Users>::from_config(&config, Api::Serialize)?;
//!
//! let report = harness.run_all();
//! println!("{}", report);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Harness (JsonBenchmark, Report)    │
//! ├─────────────────────────────────────┤
//! │  Bench (JsonBench) │ BenchSupport    │
//! ├─────────────────────────────────────┤
//! │  JsonSource (pre-encoded samples)    │
//! ├─────────────────────────────────────┤
//! │ codec: serde_json, simd-json,        │
//! │ bincode, msgpack, cbor, prost, ...   │
//! ├───────────────────┬─────────────────┤
//! │ schema (UsersFb)  │ proto           │
//! ├───────────────────┴─────────────────┤
//! │  flatbuf: Table, Builder, Verifier   │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`flatbuf`]: table buffer builder, zero-copy accessor and verifier
//! - [`schema`]: generated `UsersFb` accessors and model mapping
//! - `model`: `Users`/`Clients` payloads, `Dataset` and the data generator
//! - `proto`: protobuf messages for the users payload
//! - `codec`: libraries, APIs, output shapes and the format adapters
//! - `support`: capability registry
//! - `source`, `bench`: benchmark inputs and per-library operations
//! - `harness`: round-trip verification and reporting
//! - `config`: constants and `BenchConfig`

#[macro_use]
mod macros;

pub mod bench;
pub mod codec;
pub mod config;
pub mod flatbuf;
pub mod harness;
pub mod model;
pub mod proto;
pub mod schema;
pub mod source;
pub mod support;

pub use bench::{Bench, JsonBench};
pub use codec::{Api, BinaryFormat, Library, Output, Shape};
pub use config::BenchConfig;
pub use harness::{JsonBenchmark, Outcome, Report, SkipReason};
pub use model::{Clients, DataKind, Dataset, Users};
pub use source::JsonSource;
pub use support::BenchSupport;
