//! In-memory adapters.
//!
//! - `InMemoryStore` - Store implementation backed by vectors behind a mutex

mod in_memory_store;

pub use in_memory_store::{InMemoryStore, StoreOperation};
