//! # jsonbench Configuration Constants
//!
//! This module centralizes all numeric constants, grouping interdependent
//! values together and documenting their relationships. Constants that depend
//! on each other are co-located to prevent mismatch bugs.
//!
//! ## Dependency Graph
//!
//! ```text
//! SIZE_VOFFSET (2 bytes)
//!       │
//!       ├─> VTABLE_METADATA_FIELDS (2: vtable size + object size)
//!       │
//!       └─> VTABLE_HEADER_SIZE (derived: fields * SIZE_VOFFSET)
//!             Field slot i lives at VTABLE_HEADER_SIZE + i * SIZE_VOFFSET
//!
//! SIZE_UOFFSET (4 bytes)
//!       │
//!       ├─> Root offset at byte 0 of every finished buffer
//!       │
//!       └─> Vector length prefix and every element offset
//!
//! FLATBUFFERS_MAX_BUFFER_SIZE
//!       │
//!       └─> Must fit in a signed 32-bit soffset (vtable distance)
//!
//! ITERATIONS (3)
//!       │
//!       └─> Repetitions per library test in the verification harness
//! ```
//!
//! ## Critical Invariants
//!
//! These invariants are enforced by compile-time assertions:
//!
//! 1. `VTABLE_HEADER_SIZE == VTABLE_METADATA_FIELDS * SIZE_VOFFSET`
//! 2. `SIZE_SOFFSET == SIZE_UOFFSET` (object header and offsets share alignment)
//! 3. `FLATBUFFERS_MAX_BUFFER_SIZE <= i32::MAX`
//! 4. `DEFAULT_SOURCE_QUANTITY >= 1` and `ITERATIONS >= 1`
//!
//! ## Usage
//!
//! ```ignore
//! use crate::config::{SIZE_UOFFSET, VTABLE_HEADER_SIZE};
//! ```

// ============================================================================
// TABLE FORMAT CONSTANTS
// These define the binary layout shared by the builder, accessor and verifier
// ============================================================================

/// Size of an unsigned forward offset (root offset, vector elements, strings).
pub const SIZE_UOFFSET: usize = 4;

/// Size of the signed offset stored at the start of every table that points
/// back to its vtable.
pub const SIZE_SOFFSET: usize = 4;

/// Size of one vtable entry.
pub const SIZE_VOFFSET: usize = 2;

/// Number of metadata entries at the start of a vtable: the vtable's own byte
/// size and the inline size of the object it describes.
pub const VTABLE_METADATA_FIELDS: usize = 2;

/// Byte offset of field slot 0 inside a vtable.
pub const VTABLE_HEADER_SIZE: usize = VTABLE_METADATA_FIELDS * SIZE_VOFFSET;

/// Largest buffer the builder will grow to. Vtable distances are stored as
/// signed 32-bit integers, so nothing larger can be addressed.
pub const FLATBUFFERS_MAX_BUFFER_SIZE: usize = (i32::MAX as usize) - 1;

/// Initial capacity of a fresh builder.
pub const DEFAULT_BUILDER_CAPACITY: usize = 1024;

const _: () = assert!(
    VTABLE_HEADER_SIZE == VTABLE_METADATA_FIELDS * SIZE_VOFFSET,
    "VTABLE_HEADER_SIZE derivation mismatch"
);

const _: () = assert!(
    SIZE_SOFFSET == SIZE_UOFFSET,
    "table header and uoffsets must share a size"
);

const _: () = assert!(
    FLATBUFFERS_MAX_BUFFER_SIZE <= i32::MAX as usize,
    "FLATBUFFERS_MAX_BUFFER_SIZE must fit in a signed 32-bit offset"
);

// ============================================================================
// VERIFIER LIMITS
// Bound the work done validating untrusted buffers
// ============================================================================

/// Maximum table nesting depth accepted by the verifier.
pub const VERIFIER_MAX_DEPTH: usize = 64;

/// Maximum number of tables the verifier will visit in one buffer.
pub const VERIFIER_MAX_TABLES: usize = 1_000_000;

// ============================================================================
// BENCHMARK DEFAULTS
// ============================================================================

/// Repetitions of each library round trip in the verification harness.
/// Repeats only stabilize warm-up effects; they run sequentially.
pub const ITERATIONS: usize = 3;

/// Target JSON size of one generated payload in kilobytes.
pub const DEFAULT_PAYLOAD_KB: usize = 1;

/// Number of distinct payloads held by a benchmark source.
pub const DEFAULT_SOURCE_QUANTITY: usize = 10;

/// Seed for the data generator so runs are reproducible.
pub const DEFAULT_SEED: u64 = 0x6A73_6F6E_6265_6E63;

const _: () = assert!(DEFAULT_SOURCE_QUANTITY >= 1, "a source needs a sample");
const _: () = assert!(ITERATIONS >= 1, "a test needs at least one iteration");

// ============================================================================
// ENVIRONMENT OVERRIDES
// Read by BenchConfig::from_env
// ============================================================================

pub const ENV_SIZE_KB: &str = "JSONBENCH_SIZE_KB";
pub const ENV_QUANTITY: &str = "JSONBENCH_QUANTITY";
pub const ENV_SEED: &str = "JSONBENCH_SEED";
pub const ENV_ITERATIONS: &str = "JSONBENCH_ITERATIONS";
pub const ENV_LIBS: &str = "JSONBENCH_LIBS";
