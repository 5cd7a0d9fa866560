//! # Table - Zero-Copy Table Access
//!
//! This module provides `Table` and `Vector`, lightweight cursors that
//! reinterpret a finished buffer in place. Nothing is copied: strings come back
//! as `&str` borrowed from the buffer and nested tables are new cursors over
//! the same slice.
//!
//! ## Resolution Steps
//!
//! ```text
//! root table     = read_u32(0)
//! vtable         = table - read_i32(table)
//! vtable size    = read_u16(vtable)
//! field offset   = slot < vtable size ? read_u16(vtable + slot) : 0
//! field value    = table + field offset               (scalars)
//! field target   = (table + off) + read_u32(table + off)   (strings, vectors, tables)
//! vector length  = read_u32(target), elements at target + 4
//! ```
//!
//! A zero field offset means the field is absent. Accessors turn that into the
//! caller-supplied default for scalars and `None` for everything else.
//!
//! ## Corruption
//!
//! `Table` trusts its buffer. Reading a buffer that was never verified and
//! turns out to be malformed panics on the first out-of-bounds offset; it never
//! returns bytes from outside the buffer. Run `verifier::verify_root` first
//! when the buffer comes from an untrusted source.

use crate::config::{SIZE_UOFFSET, SIZE_VOFFSET, VTABLE_HEADER_SIZE};
use crate::flatbuf::scalar::{read_scalar, Scalar};

/// Byte offset of a field entry inside a vtable.
pub type VOffset = u16;

/// Vtable byte offset of the field with the given schema index.
pub const fn field_slot(field_index: usize) -> VOffset {
    (VTABLE_HEADER_SIZE + field_index * SIZE_VOFFSET) as VOffset
}

/// Follows the uoffset stored at `pos`.
#[inline]
pub fn indirect(buf: &[u8], pos: usize) -> usize {
    pos + read_scalar::<u32>(buf, pos) as usize
}

/// Reads the length-prefixed string starting at `pos`.
pub fn read_str(buf: &[u8], pos: usize) -> &str {
    let len = read_scalar::<u32>(buf, pos) as usize;
    let start = pos + SIZE_UOFFSET;
    std::str::from_utf8(&buf[start..start + len])
        .expect("corrupted flatbuffer: string is not valid UTF-8")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Table<'a> {
    pub fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    /// Resolves the root table from the leading uoffset.
    pub fn root(buf: &'a [u8]) -> Self {
        Self::new(buf, indirect(buf, 0))
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn vtable(&self) -> usize {
        let soffset = read_scalar::<i32>(self.buf, self.pos) as isize;
        self.pos
            .checked_add_signed(-soffset)
            .expect("corrupted flatbuffer: vtable offset out of range")
    }

    pub fn vtable_size(&self) -> VOffset {
        read_scalar::<u16>(self.buf, self.vtable())
    }

    /// Inline size of this table, including its soffset header.
    pub fn object_size(&self) -> VOffset {
        read_scalar::<u16>(self.buf, self.vtable() + SIZE_VOFFSET)
    }

    /// Returns the offset of a field relative to the table start, or 0 when
    /// the field is absent.
    pub fn offset(&self, slot: VOffset) -> VOffset {
        let vtable = self.vtable();
        let vtable_size = read_scalar::<u16>(self.buf, vtable);
        if slot >= vtable_size {
            return 0;
        }
        read_scalar::<u16>(self.buf, vtable + slot as usize)
    }

    pub fn is_present(&self, slot: VOffset) -> bool {
        self.offset(slot) != 0
    }

    pub fn get<T: Scalar>(&self, slot: VOffset, default: T) -> T {
        self.get_optional(slot).unwrap_or(default)
    }

    pub fn get_optional<T: Scalar>(&self, slot: VOffset) -> Option<T> {
        match self.offset(slot) {
            0 => None,
            o => Some(read_scalar::<T>(self.buf, self.pos + o as usize)),
        }
    }

    fn field_target(&self, slot: VOffset) -> Option<usize> {
        match self.offset(slot) {
            0 => None,
            o => Some(indirect(self.buf, self.pos + o as usize)),
        }
    }

    pub fn get_str(&self, slot: VOffset) -> Option<&'a str> {
        self.field_target(slot).map(|pos| read_str(self.buf, pos))
    }

    pub fn get_table(&self, slot: VOffset) -> Option<Table<'a>> {
        self.field_target(slot).map(|pos| Table::new(self.buf, pos))
    }

    pub fn get_vector(&self, slot: VOffset) -> Option<Vector<'a>> {
        self.field_target(slot).map(|pos| Vector::new(self.buf, pos))
    }

    /// Length of the vector field at `slot`; 0 when absent.
    pub fn vector_len(&self, slot: VOffset) -> usize {
        self.get_vector(slot).map_or(0, |v| v.len())
    }
}

/// A length-prefixed vector. `pos` points at the u32 element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Vector<'a> {
    pub fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn len(&self) -> usize {
        read_scalar::<u32>(self.buf, self.pos) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the first element.
    pub fn start(&self) -> usize {
        self.pos + SIZE_UOFFSET
    }

    pub fn get<T: Scalar>(&self, idx: usize) -> Option<T> {
        if idx >= self.len() {
            return None;
        }
        Some(read_scalar::<T>(self.buf, self.start() + idx * T::SIZE))
    }

    pub fn get_str(&self, idx: usize) -> Option<&'a str> {
        if idx >= self.len() {
            return None;
        }
        let elem = indirect(self.buf, self.start() + idx * SIZE_UOFFSET);
        Some(read_str(self.buf, elem))
    }

    pub fn get_table(&self, idx: usize) -> Option<Table<'a>> {
        if idx >= self.len() {
            return None;
        }
        let elem = indirect(self.buf, self.start() + idx * SIZE_UOFFSET);
        Some(Table::new(self.buf, elem))
    }

    pub fn strs(&self) -> impl Iterator<Item = &'a str> + 'a {
        let this = *self;
        (0..this.len()).filter_map(move |idx| this.get_str(idx))
    }

    pub fn tables(&self) -> impl Iterator<Item = Table<'a>> + 'a {
        let this = *self;
        (0..this.len()).filter_map(move |idx| this.get_table(idx))
    }

    pub fn scalars<T: Scalar + 'a>(&self) -> impl Iterator<Item = T> + 'a {
        let this = *self;
        (0..this.len()).filter_map(move |idx| this.get::<T>(idx))
    }
}
