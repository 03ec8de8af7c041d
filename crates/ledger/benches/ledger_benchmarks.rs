use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use daigou_ledger::{InMemoryStore, Ledger, Statistics};
use daigou_orders::{OrderDraft, OrderRecord, Status};

fn synthetic_records(count: usize) -> Vec<OrderRecord> {
    let store = Arc::new(InMemoryStore::new());
    let mut ledger = Ledger::open(Arc::clone(&store)).unwrap();
    for i in 0..count {
        let draft = OrderDraft {
            client_code: format!("C{:04}", i % 40),
            product_name: format!("item-{i}"),
            quantity: (i % 5 + 1) as u32,
            cost_foreign: 40_000.0 + (i % 900) as f64 * 100.0,
            exchange_rate: 40.0,
            total_price: 1_500.0 + (i % 70) as f64 * 10.0,
            is_paid: i % 3 == 0,
            ..OrderDraft::default()
        };
        let record = ledger.create(&draft).unwrap();
        let status = Status::ALL[i % Status::ALL.len()];
        ledger.set_status(record.id, status).unwrap();
    }
    ledger.records().to_vec()
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for count in [10usize, 100, 1000, 10000].iter() {
        let records = synthetic_records(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(
            BenchmarkId::new("from_records", count),
            &records,
            |b, records| {
                b.iter(|| black_box(Statistics::from_records(black_box(records))));
            },
        );
    }

    group.finish();
}

fn bench_backup_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("backup");

    for count in [100usize, 1000].iter() {
        let records = synthetic_records(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("export", count), &records, |b, records| {
            b.iter(|| black_box(daigou_transfer::export_blob(black_box(records)).unwrap()));
        });

        let blob = daigou_transfer::export_blob(&records).unwrap();
        group.bench_with_input(BenchmarkId::new("import", count), &blob, |b, blob| {
            b.iter(|| black_box(daigou_transfer::import_blob(black_box(blob)).unwrap()));
        });
    }

    group.finish();
}

fn bench_mutation_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation_latency");
    group.sample_size(1000);

    group.bench_function("create", |b| {
        let store = Arc::new(InMemoryStore::new());
        let mut ledger = Ledger::open(Arc::clone(&store)).unwrap();
        let draft = OrderDraft {
            client_code: "A123".to_string(),
            product_name: "保濕面霜".to_string(),
            quantity: 2,
            cost_foreign: 100_000.0,
            exchange_rate: 40.0,
            total_price: 3_000.0,
            ..OrderDraft::default()
        };
        b.iter(|| black_box(ledger.create(black_box(&draft)).unwrap()));
    });

    group.bench_function("set_status_in_1000_records", |b| {
        let store = Arc::new(InMemoryStore::with_records(synthetic_records(1000)));
        let mut ledger = Ledger::open(Arc::clone(&store)).unwrap();
        let id = ledger.records()[500].id;
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let status = if flip { Status::Pickup } else { Status::Sorting };
            black_box(ledger.set_status(id, status).unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_statistics,
    bench_backup_round_trip,
    bench_mutation_latency
);
criterion_main!(benches);
