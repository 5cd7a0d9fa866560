//! Fuzz testing for the table builder.
//!
//! Builds a table from an arbitrary list of field writes, then checks that
//! the verifier accepts the result and every field reads back as written,
//! with unwritten slots reading as absent.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use jsonbench::flatbuf::{
    field_slot, verify_root, FlatBufferBuilder, Offset, Table, Verifiable, Verifier,
};

const MAX_FIELDS: usize = 24;

#[derive(Debug, Arbitrary)]
struct TableInput {
    num_fields: u8,
    force_defaults: bool,
    writes: Vec<FieldWrite>,
}

#[derive(Debug, Arbitrary, Clone)]
enum FieldWrite {
    Flag(u8, bool),
    Int(u8, i32),
    Long(u8, i64),
    Double(u8, f64),
    Text(u8, String),
    Longs(u8, Vec<i64>),
}

impl FieldWrite {
    fn index(&self) -> u8 {
        match self {
            FieldWrite::Flag(i, _)
            | FieldWrite::Int(i, _)
            | FieldWrite::Long(i, _)
            | FieldWrite::Double(i, _)
            | FieldWrite::Text(i, _)
            | FieldWrite::Longs(i, _) => *i,
        }
    }
}

/// Accepts any table; only the structural checks run.
struct AnyTable;

impl Verifiable for AnyTable {
    fn verify(verifier: &mut Verifier<'_>, pos: usize) -> eyre::Result<()> {
        verifier.table(pos)?.finish()
    }
}

fuzz_target!(|input: TableInput| {
    let num_fields = (input.num_fields as usize) % MAX_FIELDS + 1;

    let mut slots: Vec<Option<FieldWrite>> = vec![None; num_fields];
    for write in input.writes.into_iter().take(64) {
        let index = write.index() as usize % num_fields;
        if slots[index].is_none() {
            slots[index] = Some(write);
        }
    }

    let mut builder = FlatBufferBuilder::new();
    builder.force_defaults(input.force_defaults);

    let offsets: Vec<Option<Offset>> = slots
        .iter()
        .map(|write| match write {
            Some(FieldWrite::Text(_, text)) => Some(builder.create_string(text)),
            Some(FieldWrite::Longs(_, items)) => Some(builder.create_vector(items)),
            _ => None,
        })
        .collect();

    builder.start_object(num_fields);
    for (index, write) in slots.iter().enumerate() {
        let slot = field_slot(index);
        match write {
            Some(FieldWrite::Flag(_, v)) => builder.add_field(slot, *v, false),
            Some(FieldWrite::Int(_, v)) => builder.add_field(slot, *v, 0),
            Some(FieldWrite::Long(_, v)) => builder.add_field(slot, *v, 0),
            Some(FieldWrite::Double(_, v)) => builder.add_field(slot, *v, 0.0),
            Some(FieldWrite::Text(..)) | Some(FieldWrite::Longs(..)) => {
                if let Some(target) = offsets[index] {
                    builder.add_offset(slot, target);
                }
            }
            None => {}
        }
    }
    let root = builder.end_object();
    builder.finish(root);

    let data = builder.finished_data();
    verify_root::<AnyTable>(data).expect("built table must verify");

    let table = Table::root(data);
    for (index, write) in slots.iter().enumerate() {
        let slot = field_slot(index);
        match write {
            Some(FieldWrite::Flag(_, v)) => assert_eq!(table.get(slot, false), *v),
            Some(FieldWrite::Int(_, v)) => assert_eq!(table.get(slot, 0i32), *v),
            Some(FieldWrite::Long(_, v)) => assert_eq!(table.get(slot, 0i64), *v),
            Some(FieldWrite::Double(_, v)) => {
                let read = table.get(slot, 0.0f64);
                assert!(read == *v || (read.is_nan() && v.is_nan()));
            }
            Some(FieldWrite::Text(_, text)) => assert_eq!(table.get_str(slot), Some(text.as_str())),
            Some(FieldWrite::Longs(_, items)) => {
                let vector = table.get_vector(slot).expect("vector field present");
                let read: Vec<i64> = vector.scalars().collect();
                assert_eq!(&read, items);
            }
            None => assert!(!table.is_present(slot)),
        }
    }
});
