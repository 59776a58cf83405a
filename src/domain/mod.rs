//! Domain layer - Core business logic and entities.

pub mod conversation;
pub mod foundation;
pub mod user;
