//! User handlers.

mod create_user;
mod errors;
mod get_user_by_email;

pub use create_user::{CreateUserCommand, CreateUserHandler};
pub use errors::UserError;
pub use get_user_by_email::{GetUserByEmailHandler, GetUserByEmailQuery};
