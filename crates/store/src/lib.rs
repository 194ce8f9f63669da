//! Alert state store adapters.
//!
//! Concrete implementations of the
//! [`AlertStore`](oncall_pager::AlertStore) boundary. Only the in-memory
//! adapter lives here; a durable backend slots in behind the same trait.

pub mod memory;

pub use memory::MemoryAlertStore;
