//! Benchmark for registry publish fan-out
//!
//! Measures subscribe churn and publish cost as handler count grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use event_registry::{EventRegistry, Handler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn counting_handler(counter: &Arc<AtomicU64>) -> Handler<u64> {
    let counter = counter.clone();
    Handler::new(move |n: &u64| {
        counter.fetch_add(*n, Ordering::Relaxed);
    })
}

fn bench_subscribe_unsubscribe(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_registry");
    group.throughput(Throughput::Elements(1));

    let registry = EventRegistry::<u64>::new();
    let counter = Arc::new(AtomicU64::new(0));
    let handler = counting_handler(&counter);

    group.bench_function("subscribe_unsubscribe", |b| {
        b.iter(|| {
            registry.subscribe(black_box("churn"), handler.clone());
            registry.unsubscribe(black_box("churn"), &handler);
        });
    });

    group.finish();
}

fn bench_publish_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_fanout");

    for handlers in [1usize, 10, 100] {
        let registry = EventRegistry::<u64>::new();
        let counter = Arc::new(AtomicU64::new(0));
        for _ in 0..handlers {
            registry.subscribe("fanout", counting_handler(&counter));
        }

        group.throughput(Throughput::Elements(handlers as u64));
        group.bench_with_input(BenchmarkId::from_parameter(handlers), &handlers, |b, _| {
            b.iter(|| registry.publish(black_box("fanout"), black_box(&1)));
        });
    }

    group.finish();
}

fn bench_publish_to_empty_channel(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_registry");
    group.throughput(Throughput::Elements(1));

    let registry = EventRegistry::<u64>::new();
    for i in 0..1000 {
        registry.declare_channel(format!("channel-{:04}", i));
    }

    group.bench_function("publish_noop", |b| {
        b.iter(|| registry.publish(black_box("channel-0500"), black_box(&1)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_subscribe_unsubscribe,
    bench_publish_fanout,
    bench_publish_to_empty_channel,
);
criterion_main!(benches);
