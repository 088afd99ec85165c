//! Account holder: owns an ordered collection of accounts.
//!
//! Accounts are exposed read-only; balance changes go through `deposit`/`withdraw`,
//! which route to the owned account's ledger operations.

use serde::Serialize;

use banksys_core::{AccountId, Amount, DomainError, DomainResult, Entity, UserId};

use crate::account::Account;
use crate::transaction::TransactionRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    accounts: Vec<Account>,
}

impl User {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        Self::with_id(UserId::new(), name)
    }

    pub fn with_id(id: UserId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            accounts: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take ownership of an account; its position is the insertion order.
    pub fn add_account(&mut self, account: Account) -> DomainResult<AccountId> {
        let id = account.id_typed();
        if self.accounts.iter().any(|a| a.id_typed() == id) {
            return Err(DomainError::conflict(format!("account {id} already added")));
        }
        self.accounts.push(account);
        Ok(id)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id_typed() == id)
    }

    pub fn deposit(&mut self, id: AccountId, amount: Amount) -> DomainResult<TransactionRecord> {
        self.account_mut(id)?.deposit(amount)
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Amount) -> DomainResult<TransactionRecord> {
        self.account_mut(id)?.withdraw(amount)
    }

    /// Sum of balances across all owned accounts.
    pub fn total_balance(&self) -> DomainResult<Amount> {
        self.accounts.iter().try_fold(Amount::ZERO, |total, account| {
            total
                .checked_add(account.balance())
                .ok_or_else(|| DomainError::invariant("total balance overflow"))
        })
    }

    /// Every record across accounts: account order first, then log order.
    pub fn transactions(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.accounts.iter().flat_map(|a| a.transactions().iter())
    }

    fn account_mut(&mut self, id: AccountId) -> DomainResult<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.id_typed() == id)
            .ok_or_else(DomainError::not_found)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
