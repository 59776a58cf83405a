//! User HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use routes::user_routes;
