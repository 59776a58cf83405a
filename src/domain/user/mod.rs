//! User domain module.
//!
//! Users are created once at registration and never change afterwards.

mod account;

pub use account::{NewUser, User, UserRole};
