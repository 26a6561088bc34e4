//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the cached presence list
    Users,
    /// Send a private message to the named user
    PrivateMessage { to: String, body: String },
    /// Notify the named user that a private chat starts
    StartChat { target: String },
    /// Announce typing state
    Typing { is_typing: bool },
    /// Anything else is a public message
    Public(String),
    /// Slash command that could not be parsed
    Invalid(String),
}

/// Parse a line of input into a command.
///
/// Lines starting with `/` are commands; everything else is sent as a
/// public message verbatim.
pub fn parse_input(line: &str) -> Command {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return Command::Public(line.to_string());
    }

    let mut parts = trimmed.splitn(3, ' ');
    let command = parts.next().unwrap_or("");

    match command {
        "/users" => Command::Users,
        "/pm" => match (parts.next(), parts.next()) {
            (Some(to), Some(body)) if !body.trim().is_empty() => Command::PrivateMessage {
                to: to.to_string(),
                body: body.to_string(),
            },
            _ => Command::Invalid("usage: /pm <name> <message>".to_string()),
        },
        "/chat" => match parts.next() {
            Some(target) => Command::StartChat {
                target: target.to_string(),
            },
            None => Command::Invalid("usage: /chat <name>".to_string()),
        },
        "/typing" => match parts.next() {
            None | Some("on") => Command::Typing { is_typing: true },
            Some("off") => Command::Typing { is_typing: false },
            Some(_) => Command::Invalid("usage: /typing [on|off]".to_string()),
        },
        other => Command::Invalid(format!("unknown command: {}", other)),
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// Rejections decided by the server (bad name) never resolve on retry.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::RejectedName(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
