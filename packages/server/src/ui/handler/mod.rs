mod http;
mod websocket;

pub use http::{debug_roster, get_presence, health_check};
pub use websocket::websocket_handler;
