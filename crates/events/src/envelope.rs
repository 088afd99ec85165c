//! Per-account wrapper around a committed event.

use serde::{Deserialize, Serialize};

use banksys_core::AccountId;

/// Envelope for an event committed against one account.
///
/// - `sequence_number` is the account version after the event was applied, so it is
///   monotonically increasing per account (1-based).
/// - `payload` is the domain event itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    account_id: AccountId,
    event_type: String,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        account_id: AccountId,
        event_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            account_id,
            event_type: event_type.into(),
            sequence_number,
            payload,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
