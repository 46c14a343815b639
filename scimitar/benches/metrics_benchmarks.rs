use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scimitar::{Metrics, ReferenceText, TypedBuffer};
use web_time::Duration;

fn sample_text(len: usize) -> ReferenceText {
    let words = ["lorem", "ipsum", "dolor", "sit", "amet"];
    let string: String = words
        .iter()
        .cycle()
        .flat_map(|word| word.chars().chain([' ']))
        .take(len)
        .collect();
    ReferenceText::new(&string)
}

/// A buffer typed up to `typed`, with every tenth character wrong
fn typed_buffer(text: &ReferenceText, typed: usize) -> TypedBuffer {
    let mut buffer = TypedBuffer::new(text.len());
    for (index, char) in text.chars().iter().take(typed).enumerate() {
        let char = if index % 10 == 0 { 'x' } else { *char };
        buffer.set(index, char);
    }
    buffer
}

fn benchmark_metrics_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics_compute");

    for len in [100, 1000, 10000] {
        let text = sample_text(len);
        let buffer = typed_buffer(&text, len / 2);

        group.bench_with_input(
            BenchmarkId::new("half_typed", len),
            &(text, buffer),
            |b, (text, buffer)| {
                b.iter(|| {
                    Metrics::compute(
                        black_box(text),
                        black_box(buffer),
                        black_box(Duration::from_secs(30)),
                    )
                })
            },
        );
    }

    group.finish();
}

fn benchmark_metrics_summary(c: &mut Criterion) {
    let text = sample_text(1000);
    let buffer = typed_buffer(&text, 1000);
    let metrics = Metrics::compute(&text, &buffer, Duration::from_secs(90));

    c.bench_function("metrics_summary", |b| {
        b.iter(|| black_box(&metrics).summary().to_string())
    });
}

criterion_group!(benches, benchmark_metrics_compute, benchmark_metrics_summary);
criterion_main!(benches);
