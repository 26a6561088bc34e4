//! Message formatting utilities for client display.

use idobata_server::infrastructure::dto::websocket::PresenceEntryDto;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the presence list showing all connected users
    ///
    /// # Arguments
    ///
    /// * `users` - List of connected users
    /// * `my_session_id` - The current session's ID (to mark as "me")
    pub fn format_presence_list(users: &[PresenceEntryDto], my_session_id: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Online:\n");

        if users.is_empty() {
            output.push_str("(Nobody online)\n");
        } else {
            for user in users {
                let me_suffix = if user.id == my_session_id { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", user.name, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a user-connected notification
    pub fn format_user_connected(name: &str) -> String {
        format!("\n+ {} joined the chat\n", name)
    }

    /// Format a user-disconnected notification
    pub fn format_user_disconnected(name: &str) -> String {
        format!("\n- {} left the chat\n", name)
    }

    /// Format a public chat message
    ///
    /// # Arguments
    ///
    /// * `from` - The display name of the sender
    /// * `content` - The message content
    /// * `time` - The server-stamped clock time ("H:M")
    pub fn format_chat_message(from: &str, content: &str, time: &str) -> String {
        format!("\n[{}] @{}: {}\n", time, from, content)
    }

    /// Format a private message
    pub fn format_private_message(from: &str, content: &str, time: &str) -> String {
        format!("\n[{}] (private) @{}: {}\n", time, from, content)
    }

    /// Format a private-chat-started notification
    pub fn format_private_chat_started(initiator: &str) -> String {
        format!("\n* {} started a private chat with you\n", initiator)
    }

    /// Format a private delivery error
    pub fn format_private_error(to: &str, reason: &str) -> String {
        format!("\n! Could not deliver to '{}': {}\n", to, reason)
    }

    /// Format the typing indicator line
    pub fn format_typing_users(names: &[String]) -> String {
        match names.len() {
            0 => String::new(),
            1 => format!("\n... {} is typing\n", names[0]),
            _ => format!("\n... {} are typing\n", names.join(", ")),
        }
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
