//! Chat HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use routes::chat_routes;
