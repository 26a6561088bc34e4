//! WebSocket chat client implementation.

mod domain;
mod formatter;
mod runner;
mod session;
mod ui;

pub mod error;

pub use runner::run_client;
