//! Integration tests running the server in-process and driving it with real
//! WebSocket clients.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use idobata_server::{
    domain::{Roster, Timestamp},
    infrastructure::{
        dto::websocket::{ClientEvent, ServerEvent},
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryRosterRepository,
    },
    ui::{Server, typing_list_encoder},
    usecase::{
        ConnectUserUseCase, DisconnectUserUseCase, SendPrivateMessageUseCase,
        SendPublicMessageUseCase, StartPrivateChatUseCase, TypingTracker,
    },
};
use idobata_shared::time::{SystemClock, get_jst_timestamp};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire up the server exactly as the binary does and spawn it on the port.
async fn spawn_server(port: u16) {
    let roster = Arc::new(Mutex::new(Roster::new(Timestamp::new(get_jst_timestamp()))));
    let repository = Arc::new(InMemoryRosterRepository::new(roster));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(SystemClock);

    let connect_user_usecase = Arc::new(ConnectUserUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_user_usecase = Arc::new(DisconnectUserUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let send_public_message_usecase = Arc::new(SendPublicMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let send_private_message_usecase = Arc::new(SendPrivateMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let start_private_chat_usecase = Arc::new(StartPrivateChatUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let typing_tracker = Arc::new(TypingTracker::new(
        repository.clone(),
        message_pusher.clone(),
        typing_list_encoder(),
    ));

    let server = Server::new(
        connect_user_usecase,
        disconnect_user_usecase,
        send_public_message_usecase,
        send_private_message_usecase,
        start_private_chat_usecase,
        typing_tracker,
        repository,
    );

    tokio::spawn(async move {
        server
            .run("127.0.0.1".to_string(), port)
            .await
            .expect("Server failed to run");
    });

    wait_for_health(port).await;
}

/// Poll the health endpoint until the server is up.
async fn wait_for_health(port: u16) {
    let url = format!("http://127.0.0.1:{}/api/health", port);
    for _ in 0..50 {
        if let Ok(response) = reqwest::get(&url).await
            && response.status().is_success()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("Server did not become healthy on port {}", port);
}

/// Open a WebSocket connection with the given display name.
async fn connect_client(port: u16, name: &str) -> WsClient {
    let url = format!("ws://127.0.0.1:{}/ws?name={}", port, name);
    let (ws_stream, _) = connect_async(&url)
        .await
        .expect("Failed to connect WebSocket client");
    ws_stream
}

/// Read events until one matches the predicate, with a timeout.
async fn expect_event<F>(ws: &mut WsClient, mut predicate: F) -> ServerEvent
where
    F: FnMut(&ServerEvent) -> bool,
{
    tokio::time::timeout(EVENT_TIMEOUT, async {
        loop {
            let message = ws
                .next()
                .await
                .expect("Connection closed while waiting for event")
                .expect("WebSocket read error");
            if let Message::Text(text) = message {
                let event: ServerEvent =
                    serde_json::from_str(&text).expect("Failed to parse server event");
                if predicate(&event) {
                    return event;
                }
            }
        }
    })
    .await
    .expect("Timed out waiting for event")
}

/// Wait for an updateUsers event and return the session id for the name.
async fn expect_session_id(ws: &mut WsClient, name: &str) -> String {
    let event = expect_event(ws, |e| match e {
        ServerEvent::UpdateUsers { users } => users.iter().any(|u| u.name == name),
        _ => false,
    })
    .await;

    match event {
        ServerEvent::UpdateUsers { users } => users
            .into_iter()
            .find(|u| u.name == name)
            .map(|u| u.id)
            .expect("Session id not found in presence list"),
        _ => unreachable!(),
    }
}

async fn send_event(ws: &mut WsClient, event: &ClientEvent) {
    let json = serde_json::to_string(event).expect("Failed to serialize client event");
    ws.send(Message::Text(json.into()))
        .await
        .expect("Failed to send client event");
}

/// Assert that no text frame arrives within the window.
async fn expect_silence(ws: &mut WsClient, window: Duration) {
    let result = tokio::time::timeout(window, ws.next()).await;
    if let Ok(Some(Ok(Message::Text(text)))) = result {
        panic!("Expected no event, but received: {}", text);
    }
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    // テスト項目: ヘルスチェックエンドポイントが 200 を返す
    // given (前提条件):
    let port = 19081;
    spawn_server(port).await;

    // when (操作):
    let response = reqwest::get(format!("http://127.0.0.1:{}/api/health", port))
        .await
        .unwrap();

    // then (期待する結果):
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_presence_updates_on_connect_and_disconnect() {
    // テスト項目: 接続・切断でプレゼンス一覧と参加・退出通知が配信される
    // given (前提条件):
    let port = 19082;
    spawn_server(port).await;

    let mut alice = connect_client(port, "Alice").await;
    expect_session_id(&mut alice, "Alice").await;

    // when (操作): Bob が接続
    let mut bob = connect_client(port, "Bob").await;
    expect_session_id(&mut bob, "Bob").await;

    // then (期待する結果): Alice には更新された一覧と参加通知がこの順で届く
    expect_event(&mut alice, |e| match e {
        ServerEvent::UpdateUsers { users } => users.len() == 2,
        _ => false,
    })
    .await;
    expect_event(&mut alice, |e| {
        matches!(e, ServerEvent::UserConnected { user } if user == "Bob")
    })
    .await;

    // when (操作): Bob が切断
    bob.close(None).await.unwrap();

    // then (期待する結果): Alice には退出通知と一覧から Bob が消えたことが届く
    expect_event(&mut alice, |e| {
        matches!(e, ServerEvent::UserDisconnected { user } if user == "Bob")
    })
    .await;
    expect_event(&mut alice, |e| match e {
        ServerEvent::UpdateUsers { users } => users.len() == 1 && users[0].name == "Alice",
        _ => false,
    })
    .await;

    // HTTP API でも確認
    let response = reqwest::get(format!("http://127.0.0.1:{}/api/presence", port))
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_public_message_is_stamped_by_server() {
    // テスト項目: 公開メッセージの表示名と時刻がサーバー側で刻印される
    // given (前提条件):
    let port = 19083;
    spawn_server(port).await;

    let mut alice = connect_client(port, "Alice").await;
    expect_session_id(&mut alice, "Alice").await;
    let mut bob = connect_client(port, "Bob").await;
    expect_session_id(&mut bob, "Bob").await;

    // when (操作): Alice がでたらめな表示名と時刻を申告して送信
    send_event(
        &mut alice,
        &ClientEvent::SendMessage {
            user: "Mallory".to_string(),
            msg: "hello".to_string(),
            time: "99:99".to_string(),
        },
    )
    .await;

    // then (期待する結果): 送信者を含む全員に Roster 上の表示名で届く
    for ws in [&mut alice, &mut bob] {
        let event = expect_event(ws, |e| matches!(e, ServerEvent::ReceiveMsg { .. })).await;
        match event {
            ServerEvent::ReceiveMsg { user, msg, time } => {
                assert_eq!(user, "Alice");
                assert_eq!(msg, "hello");
                assert_ne!(time, "99:99");
            }
            _ => unreachable!(),
        }
    }
}

#[tokio::test]
async fn test_private_message_reaches_only_recipient_and_sender() {
    // テスト項目: プライベートメッセージが第三者に漏れない
    // given (前提条件):
    let port = 19084;
    spawn_server(port).await;

    let mut alice = connect_client(port, "Alice").await;
    expect_session_id(&mut alice, "Alice").await;
    let mut bob = connect_client(port, "Bob").await;
    let bob_id = expect_session_id(&mut bob, "Bob").await;
    let mut charlie = connect_client(port, "Charlie").await;
    expect_session_id(&mut charlie, "Charlie").await;

    // when (操作): Alice → Bob のプライベートメッセージ
    send_event(
        &mut alice,
        &ClientEvent::PrivateMessage {
            to: bob_id,
            message: "secret".to_string(),
        },
    )
    .await;

    // then (期待する結果): Bob と Alice に届く
    for ws in [&mut bob, &mut alice] {
        let event = expect_event(ws, |e| matches!(e, ServerEvent::PrivateMessage { .. })).await;
        match event {
            ServerEvent::PrivateMessage { user, msg, .. } => {
                assert_eq!(user, "Alice");
                assert_eq!(msg, "secret");
            }
            _ => unreachable!(),
        }
    }

    // Charlie にはプレゼンス関連以外何も届かない
    expect_silence(&mut charlie, Duration::from_millis(500)).await;
}

#[tokio::test]
async fn test_private_error_on_unknown_recipient() {
    // テスト項目: 宛先不明のプライベートメッセージで送信者のみにエラーが届き、
    //             ルーターは後続のメッセージを処理し続ける
    // given (前提条件):
    let port = 19085;
    spawn_server(port).await;

    let mut alice = connect_client(port, "Alice").await;
    expect_session_id(&mut alice, "Alice").await;

    // when (操作): 存在しないセッションへ送信
    send_event(
        &mut alice,
        &ClientEvent::PrivateMessage {
            to: "ghost".to_string(),
            message: "lost".to_string(),
        },
    )
    .await;

    // then (期待する結果): private-error が届く
    let event = expect_event(&mut alice, |e| {
        matches!(e, ServerEvent::PrivateError { .. })
    })
    .await;
    match event {
        ServerEvent::PrivateError { to, reason } => {
            assert_eq!(to, "ghost");
            assert!(reason.contains("not connected"));
        }
        _ => unreachable!(),
    }

    // ルーターが生きていることを公開メッセージで確認
    send_event(
        &mut alice,
        &ClientEvent::SendMessage {
            user: "Alice".to_string(),
            msg: "still here".to_string(),
            time: "0:0".to_string(),
        },
    )
    .await;
    expect_event(&mut alice, |e| {
        matches!(e, ServerEvent::ReceiveMsg { msg, .. } if msg == "still here")
    })
    .await;
}

#[tokio::test]
async fn test_typing_indicator_broadcast() {
    // テスト項目: タイピング状態の開始・停止が全セッションへ配信される
    // given (前提条件):
    let port = 19086;
    spawn_server(port).await;

    let mut alice = connect_client(port, "Alice").await;
    expect_session_id(&mut alice, "Alice").await;
    let mut bob = connect_client(port, "Bob").await;
    expect_session_id(&mut bob, "Bob").await;

    // when (操作): Alice がタイピング開始
    send_event(
        &mut alice,
        &ClientEvent::UserTyping {
            is_typing: true,
            user: "Alice".to_string(),
        },
    )
    .await;

    // then (期待する結果): Bob に Alice のタイピング中一覧が届く
    expect_event(&mut bob, |e| {
        matches!(e, ServerEvent::UpdateTypingUsers { users } if users == &vec!["Alice".to_string()])
    })
    .await;

    // when (操作): Alice がタイピング停止
    send_event(
        &mut alice,
        &ClientEvent::UserTyping {
            is_typing: false,
            user: "Alice".to_string(),
        },
    )
    .await;

    // then (期待する結果): 空の一覧が届く
    expect_event(&mut bob, |e| {
        matches!(e, ServerEvent::UpdateTypingUsers { users } if users.is_empty())
    })
    .await;
}

#[tokio::test]
async fn test_start_private_chat_notifies_target() {
    // テスト項目: プライベートチャット開始通知が相手のみに届く
    // given (前提条件):
    let port = 19087;
    spawn_server(port).await;

    let mut alice = connect_client(port, "Alice").await;
    let alice_id = expect_session_id(&mut alice, "Alice").await;
    let mut bob = connect_client(port, "Bob").await;
    let bob_id = expect_session_id(&mut bob, "Bob").await;
    let mut charlie = connect_client(port, "Charlie").await;
    expect_session_id(&mut charlie, "Charlie").await;

    // when (操作): Alice が Bob とのプライベートチャット開始を通知
    send_event(&mut alice, &ClientEvent::StartPrivateChat { target: bob_id }).await;

    // then (期待する結果): Bob に開始通知が届き、開始側のセッション ID が載る
    let event = expect_event(&mut bob, |e| {
        matches!(e, ServerEvent::PrivateChatStarted { .. })
    })
    .await;
    match event {
        ServerEvent::PrivateChatStarted { initiator } => assert_eq!(initiator, alice_id),
        _ => unreachable!(),
    }

    // Charlie には届かない
    expect_silence(&mut charlie, Duration::from_millis(500)).await;
}

#[tokio::test]
async fn test_invalid_display_name_is_rejected() {
    // テスト項目: 空白のみの表示名での接続が HTTP 400 で拒否される
    // given (前提条件):
    let port = 19088;
    spawn_server(port).await;

    // when (操作):
    let url = format!("ws://127.0.0.1:{}/ws?name=%20%20", port);
    let result = connect_async(&url).await;

    // then (期待する結果):
    assert!(result.is_err());
}
