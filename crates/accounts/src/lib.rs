//! Accounts module (balances, transaction log, ledger operations).
//!
//! Pure domain logic only: no IO, no logging, no persistence concerns.

pub mod account;
pub mod ledger;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountKind, AccountType};
pub use ledger::{Deposit, LedgerCommand, Withdraw};
pub use transaction::{TransactionKind, TransactionRecord, TransactionStatus};
pub use user::User;
