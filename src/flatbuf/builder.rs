//! # FlatBufferBuilder - Back-to-Front Table Construction
//!
//! This module provides `FlatBufferBuilder`, which writes a table buffer from
//! the end towards the front. Children are always written before the tables
//! that reference them, so every stored uoffset points forward and is known
//! at the moment it is written.
//!
//! ## Usage
//!
//! ```ignore
//! let mut builder = FlatBufferBuilder::new();
//! let name = builder.create_string("Alice");
//!
//! builder.start_object(2);
//! builder.add_offset(field_slot(0), name);
//! builder.add_field::<i32>(field_slot(1), 42, 0);
//! let root = builder.end_object();
//!
//! builder.finish(root);
//! let data = builder.finished_data();
//! ```
//!
//! ## Offsets
//!
//! An `Offset` is measured from the END of the buffer, so it stays valid while
//! the builder grows by prepending space. The stored uoffset is computed from
//! the distance between the slot being written and the referenced data.
//!
//! ## Vtable Deduplication
//!
//! Tables with identical vtables share one copy. `end_object` compares the new
//! vtable against every vtable already written and, on a match, points the
//! table at the existing one instead of emitting a duplicate.
//!
//! ## Preconditions
//!
//! Misuse is a programming error and panics at the call site:
//!
//! - starting an object, vector or string while an object or vector is open
//! - adding a field outside an object, or to a slot beyond its field count
//! - ending an object or vector that was never started
//! - ending a vector whose pushed bytes differ from its declared length
//! - reading the buffer before `finish`, or writing after it

use smallvec::{smallvec, SmallVec};

use crate::config::{
    DEFAULT_BUILDER_CAPACITY, FLATBUFFERS_MAX_BUFFER_SIZE, SIZE_SOFFSET, SIZE_UOFFSET,
    SIZE_VOFFSET, VTABLE_HEADER_SIZE, VTABLE_METADATA_FIELDS,
};
use crate::flatbuf::scalar::{read_scalar, write_scalar, Scalar};
use crate::flatbuf::table::VOffset;

/// Position of written data, counted in bytes from the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset(u32);

impl Offset {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Object,
    Vector { num_elems: usize, len: usize, start: usize },
}

#[derive(Debug)]
pub struct FlatBufferBuilder {
    buf: Vec<u8>,
    head: usize,
    min_align: usize,
    state: State,
    finished: bool,
    force_defaults: bool,
    object_start: usize,
    field_locs: SmallVec<[u32; 32]>,
    written_vtables: Vec<u32>,
}

impl Default for FlatBufferBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatBufferBuilder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUILDER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, FLATBUFFERS_MAX_BUFFER_SIZE);
        Self {
            buf: vec![0u8; capacity],
            head: capacity,
            min_align: 1,
            state: State::Idle,
            finished: false,
            force_defaults: false,
            object_start: 0,
            field_locs: SmallVec::new(),
            written_vtables: Vec::new(),
        }
    }

    /// Clears all written data while keeping the allocation.
    pub fn reset(&mut self) {
        self.head = self.buf.len();
        self.min_align = 1;
        self.state = State::Idle;
        self.finished = false;
        self.object_start = 0;
        self.field_locs.clear();
        self.written_vtables.clear();
    }

    /// When set, scalar fields equal to their default are still written.
    pub fn force_defaults(&mut self, force: bool) {
        self.force_defaults = force;
    }

    /// Number of bytes written so far.
    pub fn offset(&self) -> usize {
        self.buf.len() - self.head
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn grow(&mut self) {
        let old_len = self.buf.len();
        let new_len = (old_len * 2).min(FLATBUFFERS_MAX_BUFFER_SIZE);
        assert!(
            new_len > old_len,
            "flatbuffer cannot grow beyond {} bytes",
            FLATBUFFERS_MAX_BUFFER_SIZE
        );
        let extra = new_len - old_len;
        let mut grown = vec![0u8; extra];
        grown.extend_from_slice(&self.buf);
        self.buf = grown;
        self.head += extra;
    }

    fn ensure_space(&mut self, want: usize) {
        while self.head < want {
            self.grow();
        }
    }

    fn pad(&mut self, count: usize) {
        self.ensure_space(count);
        self.head -= count;
        self.buf[self.head..self.head + count].fill(0);
    }

    /// Aligns so that after `additional` more bytes the buffer is aligned to
    /// `size`, and reserves room for one value of `size` bytes.
    fn prep(&mut self, size: usize, additional: usize) {
        if size > self.min_align {
            self.min_align = size;
        }
        let align_size = (!(self.offset() + additional)).wrapping_add(1) & (size - 1);
        self.ensure_space(align_size + size + additional);
        self.pad(align_size);
    }

    fn place<T: Scalar>(&mut self, value: T) {
        self.ensure_space(T::SIZE);
        self.head -= T::SIZE;
        write_scalar(&mut self.buf, self.head, value);
    }

    fn assert_writable(&self) {
        assert!(
            !self.finished,
            "flatbuffer already finished; call reset() before building again"
        );
    }

    fn assert_idle(&self, what: &str) {
        self.assert_writable();
        assert!(
            self.state == State::Idle,
            "cannot {} while an object or vector is in progress",
            what
        );
    }

    /// Writes an aligned scalar.
    pub fn push<T: Scalar>(&mut self, value: T) {
        self.assert_writable();
        self.prep(T::SIZE, 0);
        self.place(value);
    }

    /// Writes a uoffset pointing at `target`, which must already be written.
    pub fn push_offset(&mut self, target: Offset) {
        self.assert_writable();
        self.prep(SIZE_UOFFSET, 0);
        let target = target.value() as usize;
        assert!(
            target > 0 && target <= self.offset(),
            "offset {} does not reference data already in the buffer",
            target
        );
        let relative = (self.offset() - target + SIZE_UOFFSET) as u32;
        self.place(relative);
    }

    pub fn start_object(&mut self, num_fields: usize) {
        self.assert_idle("start an object");
        self.field_locs.clear();
        self.field_locs.resize(num_fields, 0);
        self.object_start = self.offset();
        self.state = State::Object;
    }

    fn track_field(&mut self, slot: VOffset) {
        let slot = slot as usize;
        assert!(
            slot >= VTABLE_HEADER_SIZE && slot % SIZE_VOFFSET == 0,
            "invalid vtable slot {}",
            slot
        );
        let idx = (slot - VTABLE_HEADER_SIZE) / SIZE_VOFFSET;
        assert!(
            idx < self.field_locs.len(),
            "field slot {} outside an object of {} fields",
            slot,
            self.field_locs.len()
        );
        self.field_locs[idx] = self.offset() as u32;
    }

    fn assert_in_object(&self) {
        self.assert_writable();
        assert!(
            self.state == State::Object,
            "cannot add a field before start_object"
        );
    }

    /// Adds a scalar field. Values equal to `default` are omitted unless
    /// `force_defaults` is set; readers get the default back either way.
    pub fn add_field<T: Scalar>(&mut self, slot: VOffset, value: T, default: T) {
        self.assert_in_object();
        if value == default && !self.force_defaults {
            return;
        }
        self.push(value);
        self.track_field(slot);
    }

    /// Adds a field referencing a string, vector or table written earlier.
    pub fn add_offset(&mut self, slot: VOffset, target: Offset) {
        self.assert_in_object();
        self.push_offset(target);
        self.track_field(slot);
    }

    pub fn end_object(&mut self) -> Offset {
        self.assert_writable();
        assert!(
            self.state == State::Object,
            "end_object called without a matching start_object"
        );

        self.push::<i32>(0);
        let object_offset = self.offset();

        let mut num_fields = self.field_locs.len();
        while num_fields > 0 && self.field_locs[num_fields - 1] == 0 {
            num_fields -= 1;
        }

        let vtable_len = (VTABLE_METADATA_FIELDS + num_fields) * SIZE_VOFFSET;
        let object_size = object_offset - self.object_start;
        assert!(
            object_size <= u16::MAX as usize,
            "object of {} bytes exceeds the vtable limit",
            object_size
        );

        let mut vtable: SmallVec<[u8; 64]> = smallvec![0u8; vtable_len];
        write_scalar(&mut vtable, 0, vtable_len as u16);
        write_scalar(&mut vtable, SIZE_VOFFSET, object_size as u16);
        for (idx, &loc) in self.field_locs[..num_fields].iter().enumerate() {
            let field_offset = if loc == 0 {
                0
            } else {
                (object_offset - loc as usize) as u16
            };
            write_scalar(&mut vtable, VTABLE_HEADER_SIZE + idx * SIZE_VOFFSET, field_offset);
        }

        let existing = self.written_vtables.iter().copied().find(|&written| {
            let pos = self.buf.len() - written as usize;
            read_scalar::<u16>(&self.buf, pos) as usize == vtable_len
                && self.buf[pos..pos + vtable_len] == vtable[..]
        });

        let vtable_offset = match existing {
            Some(written) => written as usize,
            None => {
                self.ensure_space(vtable_len);
                self.head -= vtable_len;
                self.buf[self.head..self.head + vtable_len].copy_from_slice(&vtable);
                let written = self.offset();
                self.written_vtables.push(written as u32);
                written
            }
        };

        let table_pos = self.buf.len() - object_offset;
        let soffset = vtable_offset as i64 - object_offset as i64;
        write_scalar(&mut self.buf, table_pos, soffset as i32);

        self.field_locs.clear();
        self.state = State::Idle;
        Offset(object_offset as u32)
    }

    /// Opens a vector of `num_elems` elements of `elem_size` bytes. Elements
    /// are pushed last to first.
    pub fn start_vector(&mut self, elem_size: usize, num_elems: usize, alignment: usize) {
        self.assert_idle("start a vector");
        self.prep(SIZE_UOFFSET, elem_size * num_elems);
        self.prep(alignment, elem_size * num_elems);
        self.state = State::Vector {
            num_elems,
            len: elem_size * num_elems,
            start: self.offset(),
        };
    }

    pub fn end_vector(&mut self) -> Offset {
        self.assert_writable();
        let (num_elems, len, start) = match self.state {
            State::Vector {
                num_elems,
                len,
                start,
            } => (num_elems, len, start),
            _ => panic!("end_vector called without a matching start_vector"),
        };
        let written = self.offset() - start;
        assert_eq!(
            written, len,
            "vector declared {} elements ({} bytes) but {} bytes were pushed",
            num_elems, len, written
        );
        self.state = State::Idle;
        self.push(num_elems as u32);
        Offset(self.offset() as u32)
    }

    pub fn create_string(&mut self, value: &str) -> Offset {
        self.assert_idle("create a string");
        let bytes = value.as_bytes();
        self.prep(SIZE_UOFFSET, bytes.len() + 1);
        self.place::<u8>(0);
        self.ensure_space(bytes.len());
        self.head -= bytes.len();
        self.buf[self.head..self.head + bytes.len()].copy_from_slice(bytes);
        self.place(bytes.len() as u32);
        Offset(self.offset() as u32)
    }

    pub fn create_vector<T: Scalar>(&mut self, items: &[T]) -> Offset {
        self.start_vector(T::SIZE, items.len(), T::SIZE);
        for &item in items.iter().rev() {
            self.push(item);
        }
        self.end_vector()
    }

    pub fn create_vector_of_offsets(&mut self, items: &[Offset]) -> Offset {
        self.start_vector(SIZE_UOFFSET, items.len(), SIZE_UOFFSET);
        for &item in items.iter().rev() {
            self.push_offset(item);
        }
        self.end_vector()
    }

    pub fn create_vector_of_strings<S: AsRef<str>>(&mut self, items: &[S]) -> Offset {
        let offsets: SmallVec<[Offset; 16]> = items
            .iter()
            .map(|item| self.create_string(item.as_ref()))
            .collect();
        self.create_vector_of_offsets(&offsets)
    }

    /// Writes the root uoffset. The buffer is read-only afterwards.
    pub fn finish(&mut self, root: Offset) {
        self.assert_idle("finish");
        self.prep(self.min_align, SIZE_UOFFSET);
        self.push_offset(root);
        self.finished = true;
    }

    pub fn finished_data(&self) -> &[u8] {
        assert!(self.finished, "finished_data called before finish");
        &self.buf[self.head..]
    }

    pub fn into_finished_data(self) -> Vec<u8> {
        assert!(self.finished, "into_finished_data called before finish");
        self.buf[self.head..].to_vec()
    }
}

const _: () = assert!(SIZE_SOFFSET == std::mem::size_of::<i32>());
