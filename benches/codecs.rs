//! Library benchmarks for jsonbench
//!
//! One benchmark per library and API for both payload kinds. Payload size,
//! sample count, seed and library selection are read from the environment
//! (`JSONBENCH_SIZE_KB`, `JSONBENCH_QUANTITY`, `JSONBENCH_SEED`,
//! `JSONBENCH_LIBS`).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsonbench::{Api, Bench, BenchConfig, Clients, Dataset, JsonBench, Library, Users};

fn config() -> BenchConfig {
    let _ = env_logger::try_init();
    BenchConfig::from_env().unwrap()
}

fn bench_kind<T: Dataset>(c: &mut Criterion, config: &BenchConfig) {
    for api in Api::ALL {
        let bench = JsonBench::<T>::from_config(config, api).unwrap();
        let json_len = bench.source().samples()[0].json().len() as u64;

        let mut group = c.benchmark_group(format!("{}_{}", T::KIND, api));
        group.throughput(Throughput::Bytes(json_len));

        for lib in Library::ALL {
            if !bench.support().supports(lib, api) {
                continue;
            }
            group.bench_with_input(BenchmarkId::from_parameter(lib), &lib, |b, &lib| {
                b.iter(|| black_box(bench.produce(black_box(lib)).unwrap()));
            });
        }

        group.finish();
    }
}

fn bench_users(c: &mut Criterion) {
    bench_kind::<Users>(c, &config());
}

fn bench_clients(c: &mut Criterion) {
    bench_kind::<Clients>(c, &config());
}

criterion_group!(benches, bench_users, bench_clients);
criterion_main!(benches);
