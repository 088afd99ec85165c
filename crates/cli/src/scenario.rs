//! The fixed demonstration run: one user, a saving and a current account.

use rust_decimal_macros::dec;
use tracing::info;

use banksys_accounts::{Account, User};
use banksys_core::{Amount, DomainResult, InterestRate};

use crate::statement::Statement;

/// Saving 5000 @ 7%: withdraw 20000, deposit 15000, withdraw 25000.
/// Current 2000: deposit 15000.
pub fn run() -> DomainResult<Statement> {
    let mut user = User::new("Dalia")?;

    let saving = user.add_account(Account::open_saving(
        Amount::from(5000),
        InterestRate::new(dec!(0.07))?,
    )?)?;
    user.withdraw(saving, Amount::from(20000))?;
    user.deposit(saving, Amount::from(15000))?;
    user.withdraw(saving, Amount::from(25000))?;

    let current = user.add_account(Account::open_current(Amount::from(2000))?)?;
    user.deposit(current, Amount::from(15000))?;

    let monthly_interest = user.account(saving).and_then(Account::monthly_interest);

    info!(
        user = user.name(),
        accounts = user.accounts().len(),
        transactions = user.transactions().count(),
        "scenario complete"
    );

    Ok(Statement::new(&user, monthly_interest))
}
