use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rust_decimal::Decimal;
use stockledger_inventory::{InventorySession, RecordMovement};
use stockledger_products::RegisterProduct;

const PRODUCTS: usize = 50;

/// Session with `movement_count` inbound movements spread over the catalog.
fn seeded_session(movement_count: usize) -> InventorySession {
    let mut session = InventorySession::new();
    for p in 0..PRODUCTS {
        session
            .register_product(RegisterProduct::new(
                format!("P{p}"),
                format!("Product {p}"),
                "Bench",
                (p % 7) as u32,
                Decimal::new(1999, 2),
            ))
            .unwrap();
    }
    for i in 0..movement_count {
        let request = RecordMovement::new(
            format!("P{}", i % PRODUCTS),
            "inbound",
            (i % 10 + 1) as i64,
            "2024-01-15",
            "bench",
        );
        session.record_movement(&request).unwrap();
    }
    session
}

fn bench_current_stock(c: &mut Criterion) {
    let mut group = c.benchmark_group("current_stock_linear_scan");

    for movement_count in [100, 1_000, 10_000].iter() {
        let session = seeded_session(*movement_count);
        group.throughput(Throughput::Elements(*movement_count as u64));
        group.bench_with_input(
            BenchmarkId::new("single_product", movement_count),
            movement_count,
            |b, _| {
                b.iter(|| session.current_stock(black_box("P7")));
            },
        );
    }

    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");
    let session = seeded_session(5_000);

    group.bench_function("total_inventory_value", |b| {
        b.iter(|| session.total_inventory_value().unwrap());
    });
    group.bench_function("find_shortages", |b| {
        b.iter(|| session.find_shortages());
    });
    group.bench_function("validate_outbound", |b| {
        b.iter(|| session.validate_movement(black_box("P3"), "outbound", 1).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_current_stock, bench_reports);
criterion_main!(benches);
