//! User Service Library
//!
//! HTTP façade over a Cassandra `users` table: `POST /users` inserts a row,
//! `GET /users/{id}` reads one back. Storage calls are traced and exported
//! over OTLP.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::{User, UserStore};
