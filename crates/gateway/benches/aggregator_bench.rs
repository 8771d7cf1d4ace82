use std::sync::Arc;
use std::time::Duration;

use common::Sku;
use criterion::{Criterion, criterion_group, criterion_main};
use events::{Broker, InMemoryBroker};
use gateway::Stores;

fn bench_get_product(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let broker = InMemoryBroker::new();
    rt.block_on(async { broker.connect().await.unwrap() });
    let stores = Stores::seeded();
    let state = gateway::create_default_state(&stores, Arc::new(broker), Duration::from_secs(5));
    let sku = Sku::new("8675309");

    c.bench_function("gateway/get_product", |b| {
        b.iter(|| {
            rt.block_on(async {
                state.aggregator.get_product(&sku).await.unwrap();
            });
        });
    });
}

fn bench_get_product_not_found(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let broker = InMemoryBroker::new();
    rt.block_on(async { broker.connect().await.unwrap() });
    let stores = Stores::seeded();
    let state = gateway::create_default_state(&stores, Arc::new(broker), Duration::from_secs(5));
    let sku = Sku::new("99999999");

    c.bench_function("gateway/get_product_not_found", |b| {
        b.iter(|| {
            rt.block_on(async {
                state.aggregator.get_product(&sku).await.unwrap_err();
            });
        });
    });
}

criterion_group!(benches, bench_get_product, bench_get_product_not_found);
criterion_main!(benches);
