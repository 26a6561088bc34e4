//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{DisplayName, SessionId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::{PrivateChatError, PrivateMessageError, SendMessageError},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub name: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> DisplayName (Domain Model)
    let name = match DisplayName::try_from(query.name.clone()) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("Rejected connection with invalid name '{}': {}", query.name, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this session to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectUserUseCase to handle connection
    // (register_client is called inside the UseCase)
    match state.connect_user_usecase.execute(name.clone(), tx).await {
        Ok((session_id, _connected_at)) => {
            tracing::info!(
                "Session '{}' connected as '{}'",
                session_id.as_str(),
                name.as_str()
            );
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session_id, name, rx)))
        }
        Err(crate::usecase::ConnectError::RosterFull) => {
            tracing::warn!(
                "Roster capacity exceeded. Rejecting connection for '{}'",
                name.as_str()
            );
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session_id: SessionId,
    name: DisplayName,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    // Broadcast the updated presence list to everyone, the new session included.
    // The new session's channel buffers until its pusher loop starts below.
    {
        let members = state.connect_user_usecase.build_presence_list().await;
        let users_json = serde_json::to_string(&ServerEvent::update_users(members)).unwrap();
        if let Err(e) = state.connect_user_usecase.broadcast_presence(&users_json).await {
            tracing::warn!("Failed to broadcast presence list: {}", e);
        }
    }

    // Notify the other sessions that a user joined
    {
        let joined_json = serde_json::to_string(&ServerEvent::UserConnected {
            user: name.as_str().to_string(),
        })
        .unwrap();
        if let Err(e) = state
            .connect_user_usecase
            .broadcast_joined(&session_id, &joined_json)
            .await
        {
            tracing::warn!("Failed to broadcast user-connected: {}", e);
        }
    }

    let session_id_clone = session_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive messages from this session
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            // Malformed events are dropped without closing the connection
                            tracing::warn!("Failed to parse client event: {}", e);
                            continue;
                        }
                    };

                    dispatch_client_event(&state_clone, &session_id_clone, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id_clone.as_str());
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive messages from other sessions and send to this one
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Teardown order matters: drop typing state before the session leaves the
    // roster so the final typing broadcast still reaches the remaining sessions.
    state.typing_tracker.clear(&session_id).await;

    match state.disconnect_user_usecase.execute(session_id.clone()).await {
        Ok((name, notify_targets)) => {
            tracing::info!(
                "Session '{}' ('{}') disconnected and removed from roster",
                session_id.as_str(),
                name.as_str()
            );

            let left_json = serde_json::to_string(&ServerEvent::UserDisconnected {
                user: name.as_str().to_string(),
            })
            .unwrap();
            if let Err(e) = state
                .disconnect_user_usecase
                .broadcast_left(notify_targets, &left_json)
                .await
            {
                tracing::warn!("Failed to broadcast user-disconnected: {}", e);
            }

            // Remaining sessions also get the updated presence list
            let members = state.connect_user_usecase.build_presence_list().await;
            let users_json = serde_json::to_string(&ServerEvent::update_users(members)).unwrap();
            if let Err(e) = state.connect_user_usecase.broadcast_presence(&users_json).await {
                tracing::warn!("Failed to broadcast presence list: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!(
                "Failed to disconnect session '{}': {}",
                session_id.as_str(),
                e
            );
        }
    }
}

/// Route a parsed client event to its usecase.
async fn dispatch_client_event(state: &Arc<AppState>, session_id: &SessionId, event: ClientEvent) {
    match event {
        // The client-supplied `user` and `time` are ignored; the server stamps
        // the roster name and its own clock.
        ClientEvent::SendMessage { msg, .. } => {
            let message = match state
                .send_public_message_usecase
                .prepare(session_id, msg)
                .await
            {
                Ok(message) => message,
                Err(SendMessageError::EmptyMessage) => {
                    tracing::debug!("Dropped empty message from '{}'", session_id.as_str());
                    return;
                }
                Err(e) => {
                    tracing::warn!("Failed to prepare message: {}", e);
                    return;
                }
            };

            let json = serde_json::to_string(&ServerEvent::receive_msg(message)).unwrap();
            if let Err(e) = state.send_public_message_usecase.broadcast(&json).await {
                tracing::warn!("Failed to broadcast message: {}", e);
            }
        }

        ClientEvent::PrivateMessage { to, message } => {
            let recipient_id = match SessionId::try_from(to.clone()) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Invalid private message recipient '{}': {}", to, e);
                    return;
                }
            };

            let message = match state
                .send_private_message_usecase
                .prepare(session_id, message)
                .await
            {
                Ok(message) => message,
                Err(PrivateMessageError::EmptyMessage) => {
                    tracing::debug!("Dropped empty private message from '{}'", session_id.as_str());
                    return;
                }
                Err(e) => {
                    tracing::warn!("Failed to prepare private message: {}", e);
                    return;
                }
            };

            let json = serde_json::to_string(&ServerEvent::private_message(message)).unwrap();
            match state
                .send_private_message_usecase
                .deliver(session_id, &recipient_id, &json)
                .await
            {
                Ok(()) => {}
                Err(e @ PrivateMessageError::UnknownRecipient(_)) => {
                    // The message is dropped; only the sender learns about it
                    let error_json = serde_json::to_string(&ServerEvent::PrivateError {
                        to,
                        reason: e.to_string(),
                    })
                    .unwrap();
                    state
                        .send_private_message_usecase
                        .notify_sender(session_id, &error_json)
                        .await;
                }
                Err(e) => {
                    tracing::warn!("Failed to deliver private message: {}", e);
                }
            }
        }

        ClientEvent::StartPrivateChat { target } => {
            let target_id = match SessionId::try_from(target.clone()) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Invalid private chat target '{}': {}", target, e);
                    return;
                }
            };

            let json = serde_json::to_string(&ServerEvent::PrivateChatStarted {
                initiator: session_id.as_str().to_string(),
            })
            .unwrap();
            match state.start_private_chat_usecase.execute(&target_id, &json).await {
                Ok(()) => {}
                Err(e @ PrivateChatError::UnknownTarget(_)) => {
                    tracing::warn!("Dropped private chat notification: {}", e);
                }
                Err(e) => {
                    tracing::warn!("Failed to push private chat notification: {}", e);
                }
            }
        }

        ClientEvent::UserTyping { is_typing, .. } => {
            Arc::clone(&state.typing_tracker)
                .set_typing(session_id.clone(), is_typing)
                .await;
        }
    }
}
