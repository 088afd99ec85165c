//! Transaction records: the immutable log entries produced by ledger operations.

use chrono::{DateTime, Utc};
use serde::{Serialize};

use banksys_core::{AccountId, Amount, DomainError, DomainResult, TransactionId};
use banksys_events::Event;

/// What a ledger operation asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// Outcome of a ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    /// The withdrawal exceeded the balance; nothing moved.
    Failed,
}

impl core::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionStatus::Success => write!(f, "Success"),
            TransactionStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Immutable log entry for one attempted ledger operation.
///
/// Records are only built by the account aggregate while deciding a command, so
/// `balance_after` always reflects the account state the record was applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    id: TransactionId,
    account_id: AccountId,
    occurred_at: DateTime<Utc>,
    kind: TransactionKind,
    amount: Amount,
    status: TransactionStatus,
    balance_after: Amount,
}

impl TransactionRecord {
    pub(crate) fn new(
        id: TransactionId,
        account_id: AccountId,
        occurred_at: DateTime<Utc>,
        kind: TransactionKind,
        amount: Amount,
        status: TransactionStatus,
        balance_after: Amount,
    ) -> Self {
        Self {
            id,
            account_id,
            occurred_at,
            kind,
            amount,
            status,
            balance_after,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The amount requested (also for failed withdrawals).
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn balance_after(&self) -> Amount {
        self.balance_after
    }

    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }

    /// Signed effect of this record on the balance (zero for failures).
    pub fn balance_delta(&self) -> Amount {
        match (self.status, self.kind) {
            (TransactionStatus::Failed, _) => Amount::ZERO,
            (TransactionStatus::Success, TransactionKind::Deposit) => self.amount,
            (TransactionStatus::Success, TransactionKind::Withdrawal) => -self.amount,
        }
    }

    /// Turn a failed withdrawal into an error value.
    ///
    /// The record stays in the account log either way; this only changes how the caller
    /// observes the outcome.
    pub fn ensure_success(&self) -> DomainResult<&Self> {
        match self.status {
            TransactionStatus::Success => Ok(self),
            TransactionStatus::Failed => Err(DomainError::insufficient_funds(
                self.amount,
                self.balance_after,
            )),
        }
    }

    /// Human-readable statement line.
    pub fn describe(&self) -> String {
        format!(
            "Date: {}, Type: {}, Amount: {}, Status: {}",
            self.occurred_at.format("%Y-%m-%d %H:%M:%S %z"),
            self.kind,
            self.amount,
            self.status
        )
    }
}

impl core::fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

impl Event for TransactionRecord {
    fn event_type(&self) -> &'static str {
        match (self.kind, self.status) {
            (TransactionKind::Deposit, _) => "banking.account.deposited",
            (TransactionKind::Withdrawal, TransactionStatus::Success) => "banking.account.withdrew",
            (TransactionKind::Withdrawal, TransactionStatus::Failed) => {
                "banking.account.withdrawal_failed"
            }
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
