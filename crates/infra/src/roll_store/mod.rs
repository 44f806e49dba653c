//! Roll storage: the queryable collection the service reads and writes.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryRollStore;
pub use r#trait::{RollStore, StoreError};
