use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use seqstore::{Action, CodecConfig, Store, StoreResult};
use std::hint::black_box;

fn bench_store_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_operations");

    let operation_counts = vec![100, 10_000];

    for count in operation_counts {
        group.bench_with_input(BenchmarkId::new("add", count), &count, |b, &count| {
            b.iter(|| {
                let store = Store::new(0);
                for i in 0..count {
                    store.add(format!("value_{i}"));
                }
                store
            });
        });

        group.bench_with_input(BenchmarkId::new("get", count), &count, |b, &count| {
            let store: Store<String> = (0..count).map(|i| format!("value_{i}")).collect();

            b.iter(|| {
                for i in 0..count {
                    black_box(store.get(i));
                }
            });
        });

        group.bench_with_input(
            BenchmarkId::new("enumerate_delete_every_tenth", count),
            &count,
            |b, &count| {
                b.iter(|| {
                    let store: Store<usize> = (0..count).collect();
                    store
                        .enumerate(
                            |idx, _| -> StoreResult<Action> {
                                Ok(if idx % 10 == 0 {
                                    Action::Delete
                                } else {
                                    Action::Continue
                                })
                            },
                            true,
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_json_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_lines");

    let store: Store<Vec<String>> = (0..10_000)
        .map(|i| vec![format!("key_{i}"), format!("value_{i}")])
        .collect();

    for workers in [1, 4] {
        let config = CodecConfig::new().with_workers(workers);
        group.bench_with_input(BenchmarkId::new("encode", workers), &config, |b, config| {
            b.iter(|| store.to_json_lines_with(config).unwrap());
        });
    }

    let bytes = store.to_json_lines().unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| {
            let restored: Store<Vec<String>> = Store::new(10_000);
            restored.from_json_lines(&bytes).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_store_operations, bench_json_lines);
criterion_main!(benches);
