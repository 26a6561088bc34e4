//! Repository 実装
//!
//! - `inmemory`: HashMap ベースのインメモリ実装
//! - 将来的に: `postgres` など

pub mod inmemory;

pub use inmemory::InMemoryRosterRepository;
