//! # Table Serialization with Vtable Field Lookup
//!
//! This module provides a FlatBuffers-compatible binary table format: a
//! builder that writes tables back-to-front and zero-copy cursors that read
//! them in place. Every field is reached indirectly through a per-table
//! vtable, so optional fields cost nothing when absent.
//!
//! ## Buffer Layout
//!
//! ```text
//! +-------------+---------------------------------------------------+
//! | Root Offset | Vtables, Tables, Vectors, Strings (any order)      |
//! | (u32)       |                                                   |
//! +-------------+---------------------------------------------------+
//! ```
//!
//! ### Table
//!
//! ```text
//! +------------------+------------------------------------------+
//! | Vtable Distance  | Inline Fields                             |
//! | (i32)            | scalars and u32 uoffsets, aligned         |
//! +------------------+------------------------------------------+
//! vtable = table_pos - distance
//! ```
//!
//! ### Vtable
//!
//! ```text
//! +---------------+---------------+---------------------------+
//! | Vtable Size   | Object Size   | Field Offsets             |
//! | (u16, bytes)  | (u16, bytes)  | [u16; N], 0 = absent      |
//! +---------------+---------------+---------------------------+
//! field i is at byte 4 + 2 * i of the vtable
//! ```
//!
//! ### Vector and String
//!
//! ```text
//! +---------------+------------------------------+
//! | Length (u32)  | Elements                     |
//! +---------------+------------------------------+
//! ```
//!
//! Table vectors store one u32 uoffset per element, each relative to its own
//! position. Strings are byte vectors with a trailing NUL that is not counted
//! in the length.
//!
//! | Component     | Type   | Description                                 |
//! |---------------|--------|---------------------------------------------|
//! | **uoffset**   | `u32`  | Forward distance from the offset's position |
//! | **soffset**   | `i32`  | Table to vtable distance (may be negative)  |
//! | **voffset**   | `u16`  | Field position relative to table start      |
//!
//! All integers are little-endian.
//!
//! ## Module Structure
//!
//! - `scalar`: `Scalar` trait for little-endian fixed-width values
//! - `table`: `Table` and `Vector` zero-copy cursors
//! - `builder`: `FlatBufferBuilder` with vtable deduplication
//! - `verifier`: `Verifier` that bounds-checks untrusted buffers

pub mod builder;
pub mod scalar;
pub mod table;
pub mod verifier;


pub use builder::{FlatBufferBuilder, Offset};
pub use scalar::Scalar;
pub use table::{field_slot, Table, VOffset, Vector};
pub use verifier::{verify_root, TableVerifier, Verifiable, Verifier};
