//! Expression engine throughput benchmarks
//!
//! Measures the three stages a form runtime exercises on every change:
//! - Cold parsing (no cache)
//! - Evaluation of cached expressions against a realistic context
//! - Dependency extraction
//!
//! Run benchmarks: `cargo bench --bench expression_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use formexpr::{EngineConfig, ExpressionContext, ExpressionEngine, FieldState};
use serde_json::json;
use std::hint::black_box;

/// Representative rules, from trivial to compound.
fn rules() -> [(&'static str, &'static str); 4] {
    [
        ("path", "fields.vin.valid"),
        ("comparison", "ctx.vehicle.mileage > 100000"),
        (
            "compound",
            "ctx.vehicle.mileage > 100000 && fields.vin.valid || !fields.email.valid",
        ),
        (
            "functions",
            "present(fields.vin.value) && in(ctx.vehicle.fuel, ctx.allowed) && length(ctx.owner) >= 2",
        ),
    ]
}

fn context() -> ExpressionContext {
    ExpressionContext::new(json!({
        "vehicle": { "mileage": 150000, "fuel": "diesel" },
        "allowed": ["petrol", "diesel", "electric"],
        "owner": "Ada"
    }))
    .with_field("vin", FieldState::new("YV1LZ", true))
    .with_field("email", FieldState::new("", false).with_error("Required"))
}

fn bench_cold_parse(c: &mut Criterion) {
    let engine = ExpressionEngine::new(EngineConfig::default().with_cache_capacity(0));
    let mut group = c.benchmark_group("cold_parse");

    for (name, source) in rules() {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| engine.validate(black_box(source)))
        });
    }
    group.finish();
}

fn bench_cached_evaluation(c: &mut Criterion) {
    let engine = ExpressionEngine::default();
    let context = context();
    let mut group = c.benchmark_group("cached_evaluation");

    for (name, source) in rules() {
        engine.evaluate(source, &context);
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| engine.evaluate(black_box(source), black_box(&context)))
        });
    }
    group.finish();
}

fn bench_dependencies(c: &mut Criterion) {
    let engine = ExpressionEngine::new(EngineConfig::default().with_cache_capacity(0));
    let mut group = c.benchmark_group("dependencies");

    for (name, source) in rules() {
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| engine.dependencies(black_box(source)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_cold_parse,
    bench_cached_evaluation,
    bench_dependencies
);
criterion_main!(benches);
