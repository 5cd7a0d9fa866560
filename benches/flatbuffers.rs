//! Table codec benchmarks for jsonbench
//!
//! These benchmarks measure the table builder, the verifier and the
//! zero-copy accessors separately from the owned-model conversion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsonbench::flatbuf::{field_slot, FlatBufferBuilder, Table};
use jsonbench::model::DataGenerator;
use jsonbench::schema::{mapping, UsersFb};
use jsonbench::{Dataset, Users};

const PAYLOAD_KB: &[usize] = &[1, 10, 100];

fn payload(kb: usize) -> Users {
    Users::generate(&mut DataGenerator::new(kb as u64), kb * 1024).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_build");

    for &kb in PAYLOAD_KB {
        let users = payload(kb);
        group.throughput(Throughput::Elements(users.len() as u64));

        group.bench_with_input(BenchmarkId::new("fresh_builder", kb), &users, |b, users| {
            b.iter(|| black_box(mapping::serialize(black_box(users))));
        });

        group.bench_with_input(BenchmarkId::new("reused_builder", kb), &users, |b, users| {
            let mut builder = FlatBufferBuilder::new();
            b.iter(|| {
                mapping::serialize_into(&mut builder, black_box(users));
                black_box(builder.finished_data().len())
            });
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_read");

    for &kb in PAYLOAD_KB {
        let bytes = mapping::serialize(&payload(kb));
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("verify", kb), &bytes, |b, bytes| {
            b.iter(|| black_box(UsersFb::root(black_box(bytes)).is_ok()));
        });

        group.bench_with_input(BenchmarkId::new("names_unchecked", kb), &bytes, |b, bytes| {
            b.iter(|| {
                let root = UsersFb::root_unchecked(black_box(bytes));
                let mut total = 0usize;
                for j in 0..root.users_length() {
                    if let Some(user) = root.users(j) {
                        total += user.name().map_or(0, str::len);
                    }
                }
                black_box(total)
            });
        });

        group.bench_with_input(BenchmarkId::new("decode_owned", kb), &bytes, |b, bytes| {
            b.iter(|| black_box(mapping::deserialize(black_box(bytes)).unwrap()));
        });
    }

    group.finish();
}

fn bench_field_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_lookup");

    let mut builder = FlatBufferBuilder::new();
    builder.start_object(4);
    builder.add_field::<i32>(field_slot(0), 7, 0);
    builder.add_field::<f64>(field_slot(2), 1.5, 0.0);
    let root = builder.end_object();
    builder.finish(root);
    let bytes = builder.into_finished_data();

    group.bench_function("present_scalar", |b| {
        let table = Table::root(&bytes);
        b.iter(|| black_box(table.get::<f64>(black_box(field_slot(2)), 0.0)));
    });

    group.bench_function("absent_beyond_vtable", |b| {
        let table = Table::root(&bytes);
        b.iter(|| black_box(table.get::<i32>(black_box(field_slot(3)), -1)));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_read, bench_field_lookup);
criterion_main!(benches);
