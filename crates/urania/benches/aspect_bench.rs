use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};
use urania::AspectCalculator;

fn chart(count: usize) -> Value {
    let mut subject = Map::new();
    for i in 0..count {
        subject.insert(
            format!("point_{}", i),
            json!({
                "name": format!("Point {}", i),
                "abs_pos": (i as f64) * 30.0 + (i as f64) * 1.5,
                "retrograde": false,
            }),
        );
    }
    Value::Object(subject)
}

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(100.0), black_box(102.0)))
    });
}

fn bench_compute_aspect_table(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let subject = chart(10);

    c.bench_function("compute_aspect_table", |b| {
        b.iter(|| calculator.compute(black_box(&subject), None))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_compute_aspect_table);
criterion_main!(benches);
