use criterion::{black_box, criterion_group, criterion_main, Criterion};

use teller_core::{AccountId, Money, Pin};
use teller_ledger::{Account, Ledger};

fn ledger_with(n: usize) -> Ledger {
    let mut ledger = Ledger::new();
    for i in 0..n {
        let account = Account::new(
            AccountId::new(format!("{i:06}")).unwrap(),
            Pin::new("0000"),
            format!("Holder {i}"),
            Money::from_cents(1_000_000_000),
        )
        .unwrap();
        ledger.add_account(account);
    }
    ledger
}

fn bench_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger");

    let ledger = ledger_with(2);
    group.bench_function("transfer_round_trip", |b| {
        b.iter(|| {
            ledger
                .transfer("000000", "000001", black_box(Money::from_cents(1)))
                .unwrap();
            ledger
                .transfer("000001", "000000", black_box(Money::from_cents(1)))
                .unwrap();
        })
    });

    let ledger = ledger_with(1_000);
    group.bench_function("authenticate_hit", |b| {
        b.iter(|| black_box(ledger.authenticate(black_box("000500"), black_box("0000"))))
    });

    group.finish();
}

criterion_group!(benches, bench_transfers);
criterion_main!(benches);
