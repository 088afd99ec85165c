//! Ledger events and their distribution.
//!
//! Transaction records are facts: once an account commits one it is wrapped in an
//! [`EventEnvelope`] and handed to an [`EventBus`] for whoever wants to follow along
//! (statement printers, tests, future projections).

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
