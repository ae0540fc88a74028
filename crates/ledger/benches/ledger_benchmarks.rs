use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tsbank_core::AccountName;
use tsbank_ledger::{InvestmentKind, LedgerService, LedgerStore, TransferKind, investment::accrued_yield};

fn rich_service() -> LedgerService {
    LedgerService::new(LedgerStore::with_accounts([
        (AccountName::new("principal"), dec!(1_000_000_000)),
        (AccountName::new("destino"), dec!(0)),
    ]))
}

fn bench_account_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("account_operations");

    group.bench_function("deposit", |b| {
        let mut svc = rich_service();
        b.iter(|| svc.deposit(black_box(dec!(10)), "principal").unwrap());
    });

    group.bench_function("transfer", |b| {
        let mut svc = rich_service();
        b.iter(|| svc.transfer(black_box(dec!(1)), "principal", "destino").unwrap());
    });

    group.bench_function("transfer_with_policy", |b| {
        let mut svc = rich_service();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        b.iter(|| {
            svc.transfer_with_policy(TransferKind::Ted, black_box(dec!(1)), "principal", "destino", now)
                .unwrap()
        });
    });

    // Rejections should stay cheap: nothing is written.
    group.bench_function("rejected_withdraw", |b| {
        let mut svc = LedgerService::seeded();
        b.iter(|| svc.withdraw(black_box(dec!(1_000_000_000_000)), "principal").unwrap_err());
    });

    group.finish();
}

fn bench_statement_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_read");

    for entries in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(entries as u64));
        group.bench_with_input(BenchmarkId::new("statement", entries), &entries, |b, &n| {
            let mut svc = rich_service();
            for _ in 0..n {
                svc.deposit(dec!(1), "principal").unwrap();
            }
            b.iter(|| black_box(svc.statement("principal").unwrap()));
        });
    }

    group.finish();
}

fn bench_accrued_yield(c: &mut Criterion) {
    let mut group = c.benchmark_group("accrued_yield");
    for kind in InvestmentKind::ALL {
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| accrued_yield(kind, black_box(dec!(500)), kind.rate(), black_box(365)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_account_operations,
    bench_statement_read,
    bench_accrued_yield
);
criterion_main!(benches);
