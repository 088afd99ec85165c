//! Statement rendering for the demonstration driver, as text or JSON.

use serde::Serialize;

use banksys_accounts::{TransactionRecord, User};
use banksys_core::Amount;
use banksys_infra::OutputFormat;

/// Everything the driver prints for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    user: String,
    records: Vec<TransactionRecord>,
    monthly_interest: Option<Amount>,
}

impl Statement {
    pub fn new(user: &User, monthly_interest: Option<Amount>) -> Self {
        Self {
            user: user.name().to_string(),
            records: user.transactions().cloned().collect(),
            monthly_interest,
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn monthly_interest(&self) -> Option<Amount> {
        self.monthly_interest
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{} Transactions:\n", self.user);
        for record in &self.records {
            out.push_str(&record.describe());
            out.push('\n');
        }
        if let Some(interest) = self.monthly_interest {
            out.push_str(&format!("Monthly Interest: {interest}\n"));
        }
        out
    }
}
