//! # Verifier - Bounds Validation for Untrusted Buffers
//!
//! `Table` accessors follow offsets without checking them. The verifier walks a
//! buffer once against a schema and proves every offset the accessors will
//! follow lands inside the buffer:
//!
//! - the root uoffset and every nested uoffset stay in bounds
//! - each vtable is at least 4 bytes, even-sized and fully in bounds
//! - each field fits inside its table's declared inline size
//! - strings are in bounds, valid UTF-8 and NUL-terminated
//! - vectors fit their declared element count
//! - nesting depth and total table count stay under configured limits
//!
//! ## Usage
//!
//! Generated types implement `Verifiable` by chaining field checks:
//!
//! ```ignore
//! impl Verifiable for FriendFb<'_> {
//!     fn verify(verifier: &mut Verifier<'_>, pos: usize) -> Result<()> {
//!         verifier
//!             .table(pos)?
//!             .string(FriendFb::VT_ID)?
//!             .string(FriendFb::VT_NAME)?
//!             .finish()
//!     }
//! }
//!
//! verify_root::<UsersFb>(bytes)?;
//! ```

use eyre::{ensure, eyre, Result};

use crate::config::{
    SIZE_SOFFSET, SIZE_UOFFSET, SIZE_VOFFSET, VERIFIER_MAX_DEPTH, VERIFIER_MAX_TABLES,
    VTABLE_HEADER_SIZE,
};
use crate::flatbuf::scalar::{read_scalar, Scalar};
use crate::flatbuf::table::VOffset;

/// A table type that can check its own layout at a given position.
pub trait Verifiable {
    fn verify(verifier: &mut Verifier<'_>, pos: usize) -> Result<()>;
}

/// Verifies a whole buffer whose root table is a `T`.
pub fn verify_root<T: Verifiable>(buf: &[u8]) -> Result<()> {
    let mut verifier = Verifier::new(buf);
    let root = verifier.root()?;
    T::verify(&mut verifier, root)
}

#[derive(Debug)]
pub struct Verifier<'a> {
    buf: &'a [u8],
    depth: usize,
    num_tables: usize,
    max_depth: usize,
    max_tables: usize,
}

impl<'a> Verifier<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, VERIFIER_MAX_DEPTH, VERIFIER_MAX_TABLES)
    }

    /// Verifier with caller-chosen nesting and table-count limits.
    pub fn with_limits(buf: &'a [u8], max_depth: usize, max_tables: usize) -> Self {
        Self {
            buf,
            depth: 0,
            num_tables: 0,
            max_depth,
            max_tables,
        }
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Position of the root table.
    pub fn root(&mut self) -> Result<usize> {
        ensure!(
            self.buf.len() >= SIZE_UOFFSET,
            "buffer too short for root offset: {} bytes",
            self.buf.len()
        );
        self.deref_uoffset(0)
    }

    fn check_range(&self, pos: usize, len: usize) -> Result<()> {
        let end = pos
            .checked_add(len)
            .ok_or_else(|| eyre!("range at {} of {} bytes overflows", pos, len))?;
        ensure!(
            end <= self.buf.len(),
            "range {}..{} outside buffer of {} bytes",
            pos,
            end,
            self.buf.len()
        );
        Ok(())
    }

    fn read<T: Scalar>(&self, pos: usize) -> Result<T> {
        self.check_range(pos, T::SIZE)?;
        Ok(read_scalar::<T>(self.buf, pos))
    }

    fn deref_uoffset(&self, pos: usize) -> Result<usize> {
        let relative = self.read::<u32>(pos)? as usize;
        ensure!(relative != 0, "zero uoffset at {}", pos);
        let target = pos
            .checked_add(relative)
            .ok_or_else(|| eyre!("uoffset at {} overflows", pos))?;
        ensure!(
            target < self.buf.len(),
            "uoffset at {} points to {}, outside buffer of {} bytes",
            pos,
            target,
            self.buf.len()
        );
        Ok(target)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        ensure!(
            self.depth <= self.max_depth,
            "table nesting exceeds {} levels",
            self.max_depth
        );
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Validates the table header and vtable at `pos`.
    pub fn table(&mut self, pos: usize) -> Result<TableVerifier<'_, 'a>> {
        self.num_tables += 1;
        ensure!(
            self.num_tables <= self.max_tables,
            "buffer holds more than {} tables",
            self.max_tables
        );

        let soffset = self.read::<i32>(pos)? as i64;
        let vtable = pos as i64 - soffset;
        ensure!(
            vtable >= 0 && (vtable as usize) < self.buf.len(),
            "vtable of table at {} points outside the buffer",
            pos
        );
        let vtable = vtable as usize;

        let vtable_size = self.read::<u16>(vtable)? as usize;
        ensure!(
            vtable_size >= VTABLE_HEADER_SIZE && vtable_size % SIZE_VOFFSET == 0,
            "malformed vtable size {} at {}",
            vtable_size,
            vtable
        );
        self.check_range(vtable, vtable_size)?;

        let object_size = self.read::<u16>(vtable + SIZE_VOFFSET)? as usize;
        ensure!(
            object_size >= SIZE_SOFFSET,
            "table at {} declares inline size {}",
            pos,
            object_size
        );
        self.check_range(pos, object_size)?;

        Ok(TableVerifier {
            verifier: self,
            pos,
            vtable,
            vtable_size,
            object_size,
        })
    }

    fn string_at(&self, pos: usize) -> Result<()> {
        let len = self.read::<u32>(pos)? as usize;
        let start = pos + SIZE_UOFFSET;
        self.check_range(start, len + 1)?;
        std::str::from_utf8(&self.buf[start..start + len])
            .map_err(|e| eyre!("string at {} is not valid UTF-8: {}", pos, e))?;
        ensure!(
            self.buf[start + len] == 0,
            "string at {} is not NUL-terminated",
            pos
        );
        Ok(())
    }

    fn vector_at(&self, pos: usize, elem_size: usize) -> Result<usize> {
        let len = self.read::<u32>(pos)? as usize;
        let bytes = len
            .checked_mul(elem_size)
            .ok_or_else(|| eyre!("vector at {} with {} elements overflows", pos, len))?;
        self.check_range(pos + SIZE_UOFFSET, bytes)?;
        Ok(len)
    }
}

/// Field checks for one table. Each check consumes and returns the verifier
/// so a schema reads as a chain.
#[derive(Debug)]
pub struct TableVerifier<'v, 'a> {
    verifier: &'v mut Verifier<'a>,
    pos: usize,
    vtable: usize,
    vtable_size: usize,
    object_size: usize,
}

impl<'v, 'a> TableVerifier<'v, 'a> {
    fn field_pos(&self, slot: VOffset, size: usize) -> Result<Option<usize>> {
        let slot = slot as usize;
        if slot + SIZE_VOFFSET > self.vtable_size {
            return Ok(None);
        }
        let offset = read_scalar::<u16>(self.verifier.buf, self.vtable + slot) as usize;
        if offset == 0 {
            return Ok(None);
        }
        ensure!(
            offset >= SIZE_SOFFSET && offset + size <= self.object_size,
            "field at vtable slot {} overruns table at {} (inline size {})",
            slot,
            self.pos,
            self.object_size
        );
        Ok(Some(self.pos + offset))
    }

    pub fn scalar<T: Scalar>(self, slot: VOffset) -> Result<Self> {
        self.field_pos(slot, T::SIZE)?;
        Ok(self)
    }

    pub fn string(self, slot: VOffset) -> Result<Self> {
        if let Some(field) = self.field_pos(slot, SIZE_UOFFSET)? {
            let target = self.verifier.deref_uoffset(field)?;
            self.verifier.string_at(target)?;
        }
        Ok(self)
    }

    pub fn vector_of_scalars<T: Scalar>(self, slot: VOffset) -> Result<Self> {
        if let Some(field) = self.field_pos(slot, SIZE_UOFFSET)? {
            let target = self.verifier.deref_uoffset(field)?;
            self.verifier.vector_at(target, T::SIZE)?;
        }
        Ok(self)
    }

    pub fn vector_of_strings(self, slot: VOffset) -> Result<Self> {
        if let Some(field) = self.field_pos(slot, SIZE_UOFFSET)? {
            let target = self.verifier.deref_uoffset(field)?;
            let len = self.verifier.vector_at(target, SIZE_UOFFSET)?;
            let start = target + SIZE_UOFFSET;
            for idx in 0..len {
                let elem = self.verifier.deref_uoffset(start + idx * SIZE_UOFFSET)?;
                self.verifier.string_at(elem)?;
            }
        }
        Ok(self)
    }

    pub fn table_field<T: Verifiable>(self, slot: VOffset) -> Result<Self> {
        if let Some(field) = self.field_pos(slot, SIZE_UOFFSET)? {
            let target = self.verifier.deref_uoffset(field)?;
            self.verifier.enter()?;
            T::verify(self.verifier, target)?;
            self.verifier.leave();
        }
        Ok(self)
    }

    pub fn vector_of_tables<T: Verifiable>(self, slot: VOffset) -> Result<Self> {
        if let Some(field) = self.field_pos(slot, SIZE_UOFFSET)? {
            let target = self.verifier.deref_uoffset(field)?;
            let len = self.verifier.vector_at(target, SIZE_UOFFSET)?;
            let start = target + SIZE_UOFFSET;
            self.verifier.enter()?;
            for idx in 0..len {
                let elem = self.verifier.deref_uoffset(start + idx * SIZE_UOFFSET)?;
                T::verify(self.verifier, elem)?;
            }
            self.verifier.leave();
        }
        Ok(self)
    }

    pub fn finish(self) -> Result<()> {
        Ok(())
    }
}
