//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use idobata_server::infrastructure::dto::websocket::{ClientEvent, PresenceEntryDto, ServerEvent};
use idobata_shared::time::{get_jst_timestamp, timestamp_to_clock_time};

use crate::{
    domain::{Command, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// The last known presence list, kept for name -> session id resolution.
type RosterCache = Arc<Mutex<Vec<PresenceEntryDto>>>;

/// Run the WebSocket client session
pub async fn run_client_session(
    url: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Construct URL with the display name as query parameter
    let url = format!("{}?name={}", url, name);

    let (ws_stream, _response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            let error_msg = e.to_string();

            // Check for HTTP 400 Bad Request (rejected display name)
            if error_msg.contains("400") || error_msg.contains("Bad Request") {
                return Err(Box::new(ClientError::RejectedName(name.to_string())));
            }
            // Check for HTTP 503 Service Unavailable (roster full)
            if error_msg.contains("503") || error_msg.contains("Service Unavailable") {
                return Err(Box::new(ClientError::ServerFull(name.to_string())));
            }

            return Err(Box::new(ClientError::ConnectionError(error_msg)));
        }
    };

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send.\n\
         Commands: /users, /pm <name> <message>, /chat <name>, /typing [on|off]\n\
         Press Ctrl+C to exit.\n",
        name
    );

    let (mut write, mut read) = ws_stream.split();

    let roster: RosterCache = Arc::new(Mutex::new(Vec::new()));
    let my_id: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

    // Clone for the read task
    let name_for_read = name.to_string();
    let roster_for_read = roster.clone();
    let my_id_for_read = my_id.clone();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => {
                            handle_server_event(
                                event,
                                &name_for_read,
                                &roster_for_read,
                                &my_id_for_read,
                            )
                            .await;
                        }
                        Err(_) => {
                            print!("{}", MessageFormatter::format_raw_message(&text));
                        }
                    }
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let name_for_prompt = name.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", name_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to handle stdin input and send to WebSocket
    let name_for_write = name.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let event = match build_client_event(&line, &name_for_write, &roster, &my_id).await {
                Some(event) => event,
                None => {
                    redisplay_prompt(&name_for_write);
                    continue;
                }
            };

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}

/// Display a server event and maintain the roster cache.
async fn handle_server_event(
    event: ServerEvent,
    my_name: &str,
    roster: &RosterCache,
    my_id: &Arc<Mutex<Option<String>>>,
) {
    match event {
        ServerEvent::UpdateUsers { users } => {
            // Resolve our own session id when it is unambiguous. The server
            // allows duplicate display names, so this may stay unknown.
            {
                let mut my_id = my_id.lock().await;
                if my_id.is_none() {
                    let mine: Vec<&PresenceEntryDto> =
                        users.iter().filter(|u| u.name == my_name).collect();
                    if let [only] = mine.as_slice() {
                        *my_id = Some(only.id.clone());
                    }
                }
            }

            let id_for_display = my_id.lock().await.clone().unwrap_or_default();
            print!(
                "{}",
                MessageFormatter::format_presence_list(&users, &id_for_display)
            );

            let mut roster = roster.lock().await;
            *roster = users;
        }
        ServerEvent::UserConnected { user } => {
            print!("{}", MessageFormatter::format_user_connected(&user));
        }
        ServerEvent::UserDisconnected { user } => {
            print!("{}", MessageFormatter::format_user_disconnected(&user));
        }
        ServerEvent::ReceiveMsg { user, msg, time } => {
            print!("{}", MessageFormatter::format_chat_message(&user, &msg, &time));
        }
        ServerEvent::PrivateMessage { user, msg, time } => {
            print!(
                "{}",
                MessageFormatter::format_private_message(&user, &msg, &time)
            );
        }
        ServerEvent::PrivateChatStarted { initiator } => {
            // Resolve the initiator's display name from the roster cache
            let initiator_name = {
                let roster = roster.lock().await;
                roster
                    .iter()
                    .find(|u| u.id == initiator)
                    .map(|u| u.name.clone())
                    .unwrap_or(initiator)
            };
            print!(
                "{}",
                MessageFormatter::format_private_chat_started(&initiator_name)
            );
        }
        ServerEvent::PrivateError { to, reason } => {
            print!("{}", MessageFormatter::format_private_error(&to, &reason));
        }
        ServerEvent::UpdateTypingUsers { users } => {
            // Our own typing state is not worth announcing to ourselves
            let others: Vec<String> = users.into_iter().filter(|u| u != my_name).collect();
            print!("{}", MessageFormatter::format_typing_users(&others));
        }
    }
}

/// Translate a line of input into a wire event, or handle it locally.
async fn build_client_event(
    line: &str,
    my_name: &str,
    roster: &RosterCache,
    my_id: &Arc<Mutex<Option<String>>>,
) -> Option<ClientEvent> {
    match parse_input(line) {
        Command::Public(msg) => Some(ClientEvent::SendMessage {
            user: my_name.to_string(),
            msg,
            // The server re-stamps this with its own clock
            time: timestamp_to_clock_time(get_jst_timestamp()),
        }),
        Command::Users => {
            let roster = roster.lock().await;
            let id_for_display = my_id.lock().await.clone().unwrap_or_default();
            print!(
                "{}",
                MessageFormatter::format_presence_list(&roster, &id_for_display)
            );
            None
        }
        Command::PrivateMessage { to, body } => {
            match resolve_session_id(&to, roster, my_id).await {
                Some(id) => Some(ClientEvent::PrivateMessage { to: id, message: body }),
                None => {
                    println!("No user named '{}' is online", to);
                    None
                }
            }
        }
        Command::StartChat { target } => {
            match resolve_session_id(&target, roster, my_id).await {
                Some(id) => Some(ClientEvent::StartPrivateChat { target: id }),
                None => {
                    println!("No user named '{}' is online", target);
                    None
                }
            }
        }
        Command::Typing { is_typing } => Some(ClientEvent::UserTyping {
            is_typing,
            user: my_name.to_string(),
        }),
        Command::Invalid(reason) => {
            println!("{}", reason);
            None
        }
    }
}

/// Resolve a display name to a session id using the roster cache.
///
/// Our own session is skipped so a user sharing our name is still reachable.
async fn resolve_session_id(
    name: &str,
    roster: &RosterCache,
    my_id: &Arc<Mutex<Option<String>>>,
) -> Option<String> {
    let my_id = my_id.lock().await.clone();
    let roster = roster.lock().await;
    roster
        .iter()
        .filter(|u| Some(&u.id) != my_id.as_ref())
        .find(|u| u.name == name)
        .map(|u| u.id.clone())
}
