use serde::{Deserialize, Serialize};

use banksys_core::{AccountId, AggregateRoot, Amount, DomainError, DomainResult, InterestRate};

use crate::transaction::TransactionRecord;

/// Account variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Saving,
    Current,
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountType::Saving => write!(f, "Saving"),
            AccountType::Current => write!(f, "Current"),
        }
    }
}

/// Variant-specific payload on top of the shared balance-and-log core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AccountKind {
    /// Interest-bearing account.
    Saving { rate: InterestRate },
    Current,
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Saving { .. } => AccountType::Saving,
            AccountKind::Current => AccountType::Current,
        }
    }
}

/// Aggregate root: Account.
///
/// The balance only changes by applying transaction records produced by ledger
/// commands (see `ledger`), so it always equals the opening balance plus the signed
/// effect of every successful record in `transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    kind: AccountKind,
    opening_balance: Amount,
    balance: Amount,
    transactions: Vec<TransactionRecord>,
}

impl Account {
    /// Open an account with an initial balance.
    pub fn open(id: AccountId, kind: AccountKind, opening_balance: Amount) -> DomainResult<Self> {
        if opening_balance.is_negative() {
            return Err(DomainError::validation(format!(
                "opening balance cannot be negative (got {opening_balance})"
            )));
        }
        Ok(Self {
            id,
            kind,
            opening_balance,
            balance: opening_balance,
            transactions: Vec::new(),
        })
    }

    pub fn open_saving(opening_balance: Amount, rate: InterestRate) -> DomainResult<Self> {
        Self::open(AccountId::new(), AccountKind::Saving { rate }, opening_balance)
    }

    pub fn open_current(opening_balance: Amount) -> DomainResult<Self> {
        Self::open(AccountId::new(), AccountKind::Current, opening_balance)
    }

    pub fn id_typed(&self) -> AccountId {
        self.id
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn interest_rate(&self) -> Option<InterestRate> {
        match self.kind {
            AccountKind::Saving { rate } => Some(rate),
            AccountKind::Current => None,
        }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Transaction log, oldest first.
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    /// Monthly interest on the current balance; `None` for accounts that earn none.
    pub fn monthly_interest(&self) -> Option<Amount> {
        self.interest_rate()
            .map(|rate| rate.monthly_interest(self.balance))
    }

    /// Recompute the balance from the log and compare it with the stored one.
    pub fn reconcile(&self) -> DomainResult<()> {
        let mut expected = self.opening_balance;
        for record in &self.transactions {
            expected = expected
                .checked_add(record.balance_delta())
                .ok_or_else(|| DomainError::invariant("balance overflow while reconciling"))?;
        }
        if expected != self.balance {
            return Err(DomainError::invariant(format!(
                "balance {} does not match transaction log ({expected})",
                self.balance
            )));
        }
        if self.balance.is_negative() {
            return Err(DomainError::invariant("balance cannot go negative"));
        }
        Ok(())
    }

    /// Append a record and move the balance by its signed effect.
    ///
    /// Records for another account, records whose `balance_after` does not follow from
    /// the current balance, and records that would leave the balance negative are
    /// ignored. Returns whether the record was appended.
    pub(crate) fn record_transaction(&mut self, record: TransactionRecord) -> bool {
        if record.account_id() != self.id {
            return false;
        }
        let Some(next) = self.balance.checked_add(record.balance_delta()) else {
            return false;
        };
        if next.is_negative() || next != record.balance_after() {
            return false;
        }
        self.balance = next;
        self.transactions.push(record);
        true
    }
}

impl AggregateRoot for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.transactions.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(value: rust_decimal::Decimal) -> InterestRate {
        InterestRate::new(value).unwrap()
    }

    #[test]
    fn opening_balance_must_not_be_negative() {
        let err = Account::open_current(Amount::from(-1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(Account::open_current(Amount::ZERO).is_ok());
    }

    #[test]
    fn new_account_starts_with_empty_log() {
        let account = Account::open_saving(Amount::from(5000), rate(dec!(0.07))).unwrap();
        assert_eq!(account.balance(), Amount::from(5000));
        assert_eq!(account.account_type(), AccountType::Saving);
        assert!(account.transactions().is_empty());
        assert_eq!(account.version(), 0);
        assert!(account.reconcile().is_ok());
    }

    #[test]
    fn only_saving_accounts_earn_interest() {
        let saving = Account::open_saving(Amount::from(1200), rate(dec!(0.1))).unwrap();
        let current = Account::open_current(Amount::from(1200)).unwrap();

        assert_eq!(saving.monthly_interest(), Some(Amount::new(dec!(10))));
        assert_eq!(current.monthly_interest(), None);
        assert_eq!(current.interest_rate(), None);
    }

    #[test]
    fn monthly_interest_does_not_mutate() {
        let account = Account::open_saving(Amount::from(20000), rate(dec!(0.07))).unwrap();
        let before = account.clone();
        let first = account.monthly_interest();
        let second = account.monthly_interest();
        assert_eq!(first, second);
        assert_eq!(account, before);
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let json = serde_json::to_value(AccountKind::Saving { rate: rate(dec!(0.07)) }).unwrap();
        assert_eq!(json["type"], "saving");
        assert_eq!(json["rate"], "0.07");
    }
}
