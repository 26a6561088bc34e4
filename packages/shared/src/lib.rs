//! Shared utilities for the Idobata chat workspace.
//!
//! Carries the concerns every binary needs: logging setup and
//! time handling (JST timestamps and the low-resolution clock
//! rendering used for chat messages).

pub mod logger;
pub mod time;
