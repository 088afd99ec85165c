//! Demonstration driver: builds a user with two accounts, runs a fixed sequence of
//! ledger operations and renders the resulting statement.

pub mod scenario;
pub mod statement;

pub use scenario::run;
pub use statement::Statement;
