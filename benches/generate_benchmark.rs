//! Benchmarks for orderdoc generation performance.
//!
//! Run with: cargo bench

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orderdoc::{
    generate_with_options, inspect_bytes, sanitize, GenerateOptions, LineItem, Order, OrderStatus,
    ShippingAddress,
};

/// Creates an order with the given number of line items.
fn create_order(item_count: usize) -> Order {
    let created = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
    let mut order = Order::new("ord_bench_00001234", OrderStatus::Shipped, created, 0.0)
        .with_shipping_address(ShippingAddress::new(
            "Ana Lucía Pérez",
            "Calle Mayor 7, 3º B",
            "28013",
            "Madrid",
        ));
    for i in 0..item_count {
        order = order.with_item(LineItem::new(format!("Café molido n.º {}", i), 2, 6.75));
    }
    order
}

fn bench_sanitize(c: &mut Criterion) {
    c.bench_function("sanitize_ascii", |b| {
        b.iter(|| sanitize(black_box("Ceramic mug, large (blue)")))
    });
    c.bench_function("sanitize_accented", |b| {
        b.iter(|| sanitize(black_box("Bûche de Noël « spéciale » – 2 pièces")))
    });
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let options = GenerateOptions::new().with_now(Utc.with_ymd_and_hms(2026, 9, 2, 0, 0, 0).unwrap());

    for item_count in [1, 10, 30] {
        let order = create_order(item_count);
        group.bench_function(format!("{}_items", item_count), |b| {
            b.iter(|| generate_with_options(black_box(&order), &options))
        });
    }

    let unchecked = options.clone().with_self_check(false);
    let order = create_order(10);
    group.bench_function("10_items_unchecked", |b| {
        b.iter(|| generate_with_options(black_box(&order), &unchecked))
    });

    group.finish();
}

fn bench_inspect(c: &mut Criterion) {
    let options = GenerateOptions::new().with_self_check(false);
    let bytes = match generate_with_options(&create_order(30), &options) {
        Ok(doc) => doc.bytes,
        Err(e) => panic!("generation failed: {}", e),
    };
    c.bench_function("inspect_30_items", |b| {
        b.iter(|| inspect_bytes(black_box(&bytes)))
    });
}

criterion_group!(benches, bench_sanitize, bench_generation, bench_inspect);
criterion_main!(benches);
