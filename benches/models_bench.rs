use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queue_calc::engine::evaluate;
use queue_calc::models::{MmskConfig, MmsnConfig, ModelConfig, PriorityConfig};
use queue_calc::queues::Discipline;

const SERVERS: u32 = 8;

fn build_config(model: &str, size: u32) -> ModelConfig {
    match model {
        "mmsk" => ModelConfig::Mmsk(MmskConfig {
            lambda: 12.0,
            mu: 2.0,
            s: SERVERS,
            capacity: size,
            n: Some(i64::from(size / 2)),
        }),
        "mmsn" => ModelConfig::Mmsn(MmsnConfig {
            lambda: 0.2,
            mu: 1.5,
            s: SERVERS,
            population: size,
            n: Some(i64::from(size / 2)),
        }),
        _ => ModelConfig::Priority(PriorityConfig {
            s: SERVERS,
            mu: 2.0,
            lambdas: (0..size).map(|_| 10.0 / f64::from(size)).collect(),
            discipline: Discipline::NonPreemptive,
        }),
    }
}

fn bench_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("models");
    let sizes = [16u32, 64, 160];

    for model in ["mmsk", "mmsn", "priority"] {
        for size in sizes {
            let config = build_config(model, size);
            group.bench_with_input(
                BenchmarkId::new(model, size),
                &config,
                |b, config: &ModelConfig| {
                    b.iter(|| {
                        let report = evaluate(black_box(config)).expect("evaluation should succeed");
                        black_box(report);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_models);
criterion_main!(benches);
