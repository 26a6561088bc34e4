//! Real-time presence and message routing core for Idobata.
//!
//! Tracks connected users, fans public messages out to every live
//! session, routes private messages point-to-point, and maintains
//! timeout-expiring typing indicators over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
