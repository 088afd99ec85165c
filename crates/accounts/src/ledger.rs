//! Ledger operations: deposit and withdraw as aggregate commands on `Account`.
//!
//! Each command produces exactly one `TransactionRecord`. A withdrawal that exceeds the
//! balance still produces (and records) a record, with `TransactionStatus::Failed`.
//! Only malformed requests (non-positive amounts, wrong account, overflow) are errors,
//! and those are never recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use banksys_core::{AccountId, Aggregate, Amount, DomainError, DomainResult, TransactionId};

use crate::account::Account;
use crate::transaction::{TransactionKind, TransactionRecord, TransactionStatus};

/// Command: Deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub account_id: AccountId,
    pub transaction_id: TransactionId,
    pub amount: Amount,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Withdraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub account_id: AccountId,
    pub transaction_id: TransactionId,
    pub amount: Amount,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    Deposit(Deposit),
    Withdraw(Withdraw),
}

impl LedgerCommand {
    pub fn deposit(account_id: AccountId, amount: Amount, occurred_at: DateTime<Utc>) -> Self {
        LedgerCommand::Deposit(Deposit {
            account_id,
            transaction_id: TransactionId::new(),
            amount,
            occurred_at,
        })
    }

    pub fn withdraw(account_id: AccountId, amount: Amount, occurred_at: DateTime<Utc>) -> Self {
        LedgerCommand::Withdraw(Withdraw {
            account_id,
            transaction_id: TransactionId::new(),
            amount,
            occurred_at,
        })
    }

    pub fn account_id(&self) -> AccountId {
        match self {
            LedgerCommand::Deposit(cmd) => cmd.account_id,
            LedgerCommand::Withdraw(cmd) => cmd.account_id,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            LedgerCommand::Deposit(cmd) => cmd.amount,
            LedgerCommand::Withdraw(cmd) => cmd.amount,
        }
    }
}

impl Aggregate for Account {
    type Command = LedgerCommand;
    type Event = TransactionRecord;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        // Version is derived from the log length, so appending is the +1.
        // Records that do not follow from the current state are dropped.
        self.record_transaction(event.clone());
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::Deposit(cmd) => self.handle_deposit(cmd),
            LedgerCommand::Withdraw(cmd) => self.handle_withdraw(cmd),
        }
    }
}

impl Account {
    fn ensure_account_id(&self, account_id: AccountId) -> Result<(), DomainError> {
        if self.id_typed() != account_id {
            return Err(DomainError::invariant("account_id mismatch"));
        }
        Ok(())
    }

    fn handle_deposit(&self, cmd: &Deposit) -> Result<Vec<TransactionRecord>, DomainError> {
        self.ensure_account_id(cmd.account_id)?;
        let amount = cmd.amount.ensure_positive("deposit amount")?;

        let balance_after = self
            .balance()
            .checked_add(amount)
            .ok_or_else(|| DomainError::invariant("deposit would overflow the balance"))?;

        Ok(vec![TransactionRecord::new(
            cmd.transaction_id,
            cmd.account_id,
            cmd.occurred_at,
            TransactionKind::Deposit,
            amount,
            TransactionStatus::Success,
            balance_after,
        )])
    }

    fn handle_withdraw(&self, cmd: &Withdraw) -> Result<Vec<TransactionRecord>, DomainError> {
        self.ensure_account_id(cmd.account_id)?;
        let amount = cmd.amount.ensure_positive("withdrawal amount")?;

        // Inclusive boundary: withdrawing the whole balance is allowed.
        let balance = self.balance();
        let (status, balance_after) = if amount <= balance {
            let remaining = balance
                .checked_sub(amount)
                .ok_or_else(|| DomainError::invariant("withdrawal would overflow the balance"))?;
            (TransactionStatus::Success, remaining)
        } else {
            (TransactionStatus::Failed, balance)
        };

        Ok(vec![TransactionRecord::new(
            cmd.transaction_id,
            cmd.account_id,
            cmd.occurred_at,
            TransactionKind::Withdrawal,
            amount,
            status,
            balance_after,
        )])
    }

    /// Decide and apply one ledger command, returning the recorded transaction.
    pub fn execute(&mut self, command: &LedgerCommand) -> DomainResult<TransactionRecord> {
        let record = self
            .handle(command)?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::invariant("ledger command produced no record"))?;
        if !self.record_transaction(record.clone()) {
            return Err(DomainError::invariant(
                "decided record does not follow from the account state",
            ));
        }
        Ok(record)
    }

    /// Deposit `amount`, timestamped now.
    pub fn deposit(&mut self, amount: Amount) -> DomainResult<TransactionRecord> {
        self.deposit_at(amount, Utc::now())
    }

    pub fn deposit_at(
        &mut self,
        amount: Amount,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<TransactionRecord> {
        self.execute(&LedgerCommand::deposit(self.id_typed(), amount, occurred_at))
    }

    /// Withdraw `amount`, timestamped now.
    ///
    /// Insufficient funds is not an error: the returned record has
    /// `TransactionStatus::Failed` and the balance is untouched.
    pub fn withdraw(&mut self, amount: Amount) -> DomainResult<TransactionRecord> {
        self.withdraw_at(amount, Utc::now())
    }

    pub fn withdraw_at(
        &mut self,
        amount: Amount,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<TransactionRecord> {
        self.execute(&LedgerCommand::withdraw(self.id_typed(), amount, occurred_at))
    }
}
