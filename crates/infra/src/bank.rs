//! Thread-safe account registry executing ledger commands.
//!
//! Accounts are kept behind one mutex each, so a deposit or withdrawal holds its
//! account for the whole decide-then-apply step: concurrent operations on the same
//! account are serialized, operations on different accounts proceed in parallel.
//!
//! ```text
//! LedgerCommand
//!   ↓
//! 1. Look up the account handle (registry read lock, released immediately)
//!   ↓
//! 2. Lock the account, check the expected version
//!   ↓
//! 3. Decide + apply (`Account::execute`), producing one TransactionRecord
//!   ↓
//! 4. Publish the record in an envelope (still under the account lock, so
//!    per-account publication order matches the log order)
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use banksys_accounts::{Account, LedgerCommand, TransactionRecord};
use banksys_core::{AccountId, AggregateRoot, Amount, DomainError, ExpectedVersion, TransactionId};
use banksys_events::{Event, EventBus, EventEnvelope};

/// Envelope type published for every committed record.
pub type RecordEnvelope = EventEnvelope<TransactionRecord>;

#[derive(Debug, Error)]
pub enum BankError {
    /// Validation, invariant or optimistic-concurrency failure from the domain.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("account registry lock poisoned")]
    Poisoned,

    /// The record is committed to the account log; only distribution failed.
    #[error("transaction {record_id} committed but publication failed: {reason}")]
    Publish {
        record_id: TransactionId,
        reason: String,
    },
}

#[derive(Debug)]
pub struct Bank<B> {
    accounts: RwLock<HashMap<AccountId, Arc<Mutex<Account>>>>,
    bus: B,
}

impl<B> Bank<B>
where
    B: EventBus<RecordEnvelope>,
{
    pub fn new(bus: B) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            bus,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Register an account. Ids are unique within a bank.
    pub fn open_account(&self, account: Account) -> Result<AccountId, BankError> {
        let id = account.id_typed();
        let mut accounts = self.accounts.write().map_err(|_| BankError::Poisoned)?;
        if accounts.contains_key(&id) {
            return Err(DomainError::conflict(format!("account {id} already open")).into());
        }
        accounts.insert(id, Arc::new(Mutex::new(account)));
        info!(account_id = %id, "account opened");
        Ok(id)
    }

    pub fn deposit(
        &self,
        id: AccountId,
        amount: Amount,
        expected: ExpectedVersion,
    ) -> Result<TransactionRecord, BankError> {
        self.execute(LedgerCommand::deposit(id, amount, Utc::now()), expected)
    }

    pub fn withdraw(
        &self,
        id: AccountId,
        amount: Amount,
        expected: ExpectedVersion,
    ) -> Result<TransactionRecord, BankError> {
        self.execute(LedgerCommand::withdraw(id, amount, Utc::now()), expected)
    }

    /// Run one ledger command against its account and publish the resulting record.
    pub fn execute(
        &self,
        command: LedgerCommand,
        expected: ExpectedVersion,
    ) -> Result<TransactionRecord, BankError> {
        let id = command.account_id();
        let handle = self.handle(id)?;
        let mut account = handle.lock().map_err(|_| BankError::Poisoned)?;

        expected.check(account.version())?;

        let record = account.execute(&command)?;
        let sequence_number = account.version();

        if record.is_success() {
            info!(
                account_id = %id,
                kind = %record.kind(),
                amount = %record.amount(),
                balance = %record.balance_after(),
                "transaction committed"
            );
        } else {
            warn!(
                account_id = %id,
                kind = %record.kind(),
                amount = %record.amount(),
                balance = %record.balance_after(),
                "withdrawal failed: insufficient funds"
            );
        }

        let envelope = EventEnvelope::new(
            id,
            record.event_type(),
            sequence_number,
            record.clone(),
        );
        if let Err(e) = self.bus.publish(envelope) {
            warn!(account_id = %id, transaction_id = %record.id(), "publish failed: {e:?}");
            return Err(BankError::Publish {
                record_id: record.id(),
                reason: format!("{e:?}"),
            });
        }

        Ok(record)
    }

    pub fn balance(&self, id: AccountId) -> Result<Amount, BankError> {
        self.read(id, Account::balance)
    }

    pub fn monthly_interest(&self, id: AccountId) -> Result<Option<Amount>, BankError> {
        self.read(id, Account::monthly_interest)
    }

    /// Point-in-time copy of the account (balance and full log).
    pub fn snapshot(&self, id: AccountId) -> Result<Account, BankError> {
        self.read(id, Account::clone)
    }

    fn read<T>(&self, id: AccountId, f: impl FnOnce(&Account) -> T) -> Result<T, BankError> {
        let handle = self.handle(id)?;
        let account = handle.lock().map_err(|_| BankError::Poisoned)?;
        Ok(f(&account))
    }

    fn handle(&self, id: AccountId) -> Result<Arc<Mutex<Account>>, BankError> {
        let accounts = self.accounts.read().map_err(|_| BankError::Poisoned)?;
        let handle = accounts.get(&id).cloned();
        if handle.is_none() {
            debug!(account_id = %id, "account lookup missed");
        }
        handle.ok_or(BankError::AccountNotFound(id))
    }
}
