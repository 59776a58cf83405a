//! PostgreSQL adapters - Database implementations for the Store port.
//!
//! - `PostgresStore` - users, conversations and messages over a `PgPool`

mod store;

pub use store::PostgresStore;
