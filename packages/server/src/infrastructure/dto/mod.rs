//! Data Transfer Objects (DTOs)
//!
//! プロトコル別に構成します:
//! - `websocket`: WebSocket イベントの DTO
//! - `http`: HTTP API レスポンスの DTO

pub mod conversion;
pub mod http;
pub mod websocket;
