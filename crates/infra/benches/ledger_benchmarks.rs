use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use banksys_accounts::Account;
use banksys_core::{Amount, ExpectedVersion};
use banksys_events::InMemoryEventBus;
use banksys_infra::{Bank, RecordEnvelope};

/// Alternating deposit/withdraw directly on the aggregate (no locking, no bus).
fn bench_account_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("account");

    for ops in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("deposit_withdraw", ops), &ops, |b, &ops| {
            b.iter(|| {
                let mut account = Account::open_current(Amount::from(1_000)).unwrap();
                for i in 0..ops {
                    if i % 2 == 0 {
                        account.deposit(black_box(Amount::from(10))).unwrap();
                    } else {
                        account.withdraw(black_box(Amount::from(15))).unwrap();
                    }
                }
                black_box(account.balance())
            });
        });
    }

    group.finish();
}

/// Same workload through `Bank` (registry lookup, account mutex, envelope publish).
fn bench_bank_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bank");

    for ops in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("deposit_withdraw", ops), &ops, |b, &ops| {
            b.iter(|| {
                let bank: Bank<InMemoryEventBus<RecordEnvelope>> =
                    Bank::new(InMemoryEventBus::new());
                let id = bank
                    .open_account(Account::open_current(Amount::from(1_000)).unwrap())
                    .unwrap();
                for i in 0..ops {
                    if i % 2 == 0 {
                        bank.deposit(id, Amount::from(10), ExpectedVersion::Any).unwrap();
                    } else {
                        bank.withdraw(id, Amount::from(15), ExpectedVersion::Any).unwrap();
                    }
                }
                black_box(bank.balance(id).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_account_operations, bench_bank_operations);
criterion_main!(benches);
