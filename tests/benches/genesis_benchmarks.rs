//! # Genesis Bootstrap Benchmarks
//!
//! | Stage | Work |
//! |-------|------|
//! | Validate | JSON parse, address checks, pledge policy |
//! | Transactions | One-time key derivation per pledge |
//! | Round graph | Snapshots, cache rounds, reference ring |
//! | Load | All of the above plus the in-memory commit |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

use qc_18_genesis::test_utils::{manifest_bytes, signer_address};
use qc_18_genesis::{
    GenesisLoader, GenesisLoaderApi, GenesisValidator, InMemoryGenesisStore, RoundGraphBuilder,
    StealthTransactionFactory, TopologicalCounter, MAXIMUM_NODE_COUNT, MINIMUM_NODE_COUNT,
};

const NODE_COUNTS: [usize; 3] = [MINIMUM_NODE_COUNT, 64, MAXIMUM_NODE_COUNT];

fn bench_genesis_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-genesis");
    group.measurement_time(Duration::from_secs(10));

    for nodes in NODE_COUNTS {
        let manifest = manifest_bytes(nodes);
        let genesis = GenesisValidator::parse(&manifest).unwrap();
        let transactions = StealthTransactionFactory::new(&genesis)
            .unwrap()
            .build()
            .unwrap();
        group.throughput(Throughput::Elements(nodes as u64));

        group.bench_with_input(BenchmarkId::new("validate", nodes), &manifest, |b, m| {
            b.iter(|| black_box(GenesisValidator::parse(m).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("transactions", nodes), &genesis, |b, g| {
            b.iter(|| {
                black_box(StealthTransactionFactory::new(g).unwrap().build().unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("round_graph", nodes), &genesis, |b, g| {
            b.iter(|| {
                let counter = TopologicalCounter::default();
                black_box(RoundGraphBuilder::new(g, &counter).build(&transactions).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("load", nodes), &manifest, |b, m| {
            b.iter(|| {
                let loader =
                    GenesisLoader::new(Arc::new(InMemoryGenesisStore::new()), signer_address(0));
                black_box(loader.load_genesis(m).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_genesis_stages);
criterion_main!(benches);
