//! Persistent directory state: business records plus favorites, kept in a
//! single key-value slot.

pub mod error;
pub mod slot;
pub mod snapshot;
pub mod store;

pub use error::StoreError;
pub use slot::{FileSlot, KeyValueSlot, MemorySlot};
pub use snapshot::Snapshot;
pub use store::{DirectoryStore, SearchTicket, StoreState, API_KEY_SLOT, DATA_SLOT};
