//! Medibot - backend for a cardiology chatbot.
//!
//! Users chat with an AI assistant that answers as a cardiologist. Every turn
//! is persisted (users, conversations, messages) in PostgreSQL and the whole
//! conversation history is forwarded to Google Gemini for the reply.
//!
//! The crate follows a ports-and-adapters layout:
//! - `domain` - value objects and read models
//! - `ports` - `Store` and `AIClient` traits
//! - `application` - command and query handlers (`ConverseHandler` at the core)
//! - `adapters` - PostgreSQL, Gemini, in-memory doubles and the axum HTTP API
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
