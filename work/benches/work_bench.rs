use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use atto_work::{validate_work, WorkGenerator};

fn bench_pow_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pow_generation");
    let generator = WorkGenerator::new();
    let subject = [0x42; 32];

    // Low thresholds that complete quickly enough for benchmarking.
    // Higher threshold => more iterations to find a valid nonce.
    for threshold in [0u64, 0xff00_0000_0000_0000, 0xfff0_0000_0000_0000] {
        group.bench_with_input(
            BenchmarkId::new("generate", format!("{threshold:016x}")),
            &threshold,
            |b, &threshold| {
                b.iter(|| {
                    black_box(
                        generator
                            .generate(black_box(&subject), black_box(threshold))
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_pow_validation(c: &mut Criterion) {
    let generator = WorkGenerator::new();
    let subject = [0x42; 32];
    let threshold = 0xff00_0000_0000_0000;
    let nonce = generator.generate(&subject, threshold).unwrap();

    c.bench_function("pow_validate_valid", |b| {
        b.iter(|| {
            black_box(validate_work(
                black_box(&subject),
                black_box(nonce.0),
                black_box(threshold),
            ))
        });
    });

    c.bench_function("pow_validate_invalid", |b| {
        let other = [0xFF; 32];
        b.iter(|| {
            black_box(validate_work(
                black_box(&other),
                black_box(nonce.0),
                black_box(u64::MAX),
            ))
        });
    });
}

criterion_group!(benches, bench_pow_generation, bench_pow_validation);
criterion_main!(benches);
