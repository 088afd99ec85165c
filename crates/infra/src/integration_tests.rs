//! Integration tests for the full ledger pipeline.
//!
//! Tests: Command → Account (decide + apply) → EventBus → subscriber
//!
//! Verifies:
//! - Concurrent withdrawals on one account never overdraw it
//! - Published records arrive in per-account log order
//! - The demonstration scenario end to end through `Bank`

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use banksys_accounts::{Account, TransactionKind, TransactionStatus};
    use banksys_core::{Amount, ExpectedVersion, InterestRate};
    use banksys_events::{EventBus, InMemoryEventBus};
    use rust_decimal_macros::dec;

    use crate::bank::{Bank, RecordEnvelope};

    fn setup() -> Arc<Bank<Arc<InMemoryEventBus<RecordEnvelope>>>> {
        let bus: Arc<InMemoryEventBus<RecordEnvelope>> = Arc::new(InMemoryEventBus::new());
        Arc::new(Bank::new(bus))
    }

    #[test]
    fn concurrent_withdrawals_never_overdraw() {
        let bank = setup();
        let id = bank
            .open_account(Account::open_current(Amount::from(500)).unwrap())
            .unwrap();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let bank = Arc::clone(&bank);
                thread::spawn(move || {
                    bank.withdraw(id, Amount::from(100), ExpectedVersion::Any)
                        .unwrap()
                })
            })
            .collect();

        let records: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();
        let succeeded = records.iter().filter(|r| r.is_success()).count();

        assert_eq!(succeeded, 5);
        assert_eq!(bank.balance(id).unwrap(), Amount::ZERO);

        let snapshot = bank.snapshot(id).unwrap();
        assert_eq!(snapshot.transactions().len(), 8);
        assert!(snapshot.reconcile().is_ok());
    }

    #[test]
    fn concurrent_deposits_on_separate_accounts_are_all_applied() {
        let bank = setup();
        let ids: Vec<_> = (0..4)
            .map(|_| {
                bank.open_account(Account::open_current(Amount::ZERO).unwrap())
                    .unwrap()
            })
            .collect();

        let workers: Vec<_> = ids
            .iter()
            .copied()
            .map(|id| {
                let bank = Arc::clone(&bank);
                thread::spawn(move || {
                    for _ in 0..50 {
                        bank.deposit(id, Amount::from(2), ExpectedVersion::Any).unwrap();
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        for id in ids {
            assert_eq!(bank.balance(id).unwrap(), Amount::from(100));
        }
    }

    #[test]
    fn published_sequence_follows_the_log() {
        let bank = setup();
        let sub = bank.bus().subscribe();
        let id = bank
            .open_account(Account::open_current(Amount::from(50)).unwrap())
            .unwrap();

        bank.deposit(id, Amount::from(25), ExpectedVersion::Exact(0)).unwrap();
        bank.withdraw(id, Amount::from(100), ExpectedVersion::Exact(1)).unwrap();
        bank.withdraw(id, Amount::from(75), ExpectedVersion::Exact(2)).unwrap();

        let envelopes = sub.drain();
        let sequence: Vec<u64> = envelopes.iter().map(|e| e.sequence_number()).collect();
        assert_eq!(sequence, vec![1, 2, 3]);

        let snapshot = bank.snapshot(id).unwrap();
        let published: Vec<_> = envelopes.into_iter().map(|e| e.into_payload()).collect();
        assert_eq!(published.as_slice(), snapshot.transactions());
        assert_eq!(snapshot.balance(), Amount::ZERO);
    }

    #[test]
    fn demonstration_scenario_through_the_bank() {
        let bank = setup();
        let saving = bank
            .open_account(
                Account::open_saving(Amount::from(5000), InterestRate::new(dec!(0.07)).unwrap())
                    .unwrap(),
            )
            .unwrap();
        let current = bank
            .open_account(Account::open_current(Amount::from(2000)).unwrap())
            .unwrap();

        let t1 = bank.withdraw(saving, Amount::from(20000), ExpectedVersion::Any).unwrap();
        let t2 = bank.deposit(saving, Amount::from(15000), ExpectedVersion::Any).unwrap();
        let t3 = bank.withdraw(saving, Amount::from(25000), ExpectedVersion::Any).unwrap();
        let t4 = bank.deposit(current, Amount::from(15000), ExpectedVersion::Any).unwrap();

        assert_eq!(t1.status(), TransactionStatus::Failed);
        assert_eq!(t2.status(), TransactionStatus::Success);
        assert_eq!(t3.status(), TransactionStatus::Failed);
        assert_eq!(t4.kind(), TransactionKind::Deposit);

        assert_eq!(bank.balance(saving).unwrap(), Amount::from(20000));
        assert_eq!(bank.balance(current).unwrap(), Amount::from(17000));
        assert_eq!(
            bank.monthly_interest(saving).unwrap().map(|a| a.value()),
            Some(dec!(20000) * dec!(0.07) / dec!(12))
        );
        assert_eq!(bank.monthly_interest(current).unwrap(), None);
    }
}
