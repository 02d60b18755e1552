//! Integration tests for the full chat flow.

use natter::ChatController;
use natter::core::{ConversationStore, Role};
use natter::flow::{FAILURE_MESSAGE, NO_RESPONSE_MESSAGE};
use natter::remote::{CompletionClient, CompletionError, HttpCompletionClient, ScriptedClient};
use natter::render::{MessageView, RecordingView, Tone};
use natter::storage::{ConversationStorage, DEFAULT_NAMESPACE, FileBackend, MemoryBackend};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn file_store(dir: &TempDir) -> ConversationStore {
    let backend = FileBackend::new(dir.path().to_path_buf(), DEFAULT_NAMESPACE).unwrap();
    ConversationStore::open(Box::new(backend))
}

fn reload(dir: &TempDir) -> Vec<natter::core::Conversation> {
    FileBackend::new(dir.path().to_path_buf(), DEFAULT_NAMESPACE)
        .unwrap()
        .load()
}

fn chat(
    store: ConversationStore,
    client: ScriptedClient,
) -> ChatController<ScriptedClient, RecordingView> {
    let mut chat = ChatController::new(store, client, RecordingView::new());
    chat.start().unwrap();
    chat
}

#[tokio::test]
async fn hello_round_trip_is_persisted_sanitized() {
    let dir = TempDir::new().unwrap();
    let mut chat = chat(file_store(&dir), ScriptedClient::new().reply("**Hi** there"));

    let reply = chat.submit("Hello").await.unwrap().unwrap();
    assert_eq!(reply, MessageView::bot("Hi there"));

    let stored = reload(&dir);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].messages[0].role, Role::User);
    assert_eq!(stored[0].messages[0].text, "Hello");
    assert_eq!(stored[0].messages[1].role, Role::Bot);
    assert_eq!(stored[0].messages[1].text, "Hi there");
}

#[tokio::test]
async fn missing_result_persists_fallback() {
    let dir = TempDir::new().unwrap();
    let mut chat = chat(file_store(&dir), ScriptedClient::new().empty());

    let reply = chat.submit("Hello").await.unwrap().unwrap();
    assert_eq!(reply.tone, Tone::Error);

    let stored = reload(&dir);
    assert_eq!(stored[0].messages[1].role, Role::Bot);
    assert_eq!(stored[0].messages[1].text, NO_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn network_failure_persists_notice() {
    let dir = TempDir::new().unwrap();
    let client =
        ScriptedClient::new().fail(CompletionError::Transport("connection refused".to_string()));
    let mut chat = chat(file_store(&dir), client);

    let reply = chat.submit("Hello").await.unwrap().unwrap();
    assert_eq!(reply, MessageView::error(FAILURE_MESSAGE));

    let stored = reload(&dir);
    assert_eq!(stored[0].messages[1].text, FAILURE_MESSAGE);
}

#[tokio::test]
async fn new_conversation_persists_previous_exactly_once() {
    let dir = TempDir::new().unwrap();
    let mut chat = chat(file_store(&dir), ScriptedClient::new().reply("sure"));
    let long = "Please summarize this very long document about rivers";
    chat.submit(long).await.unwrap();
    let first_id = chat.store().active().id.clone();

    chat.new_conversation().unwrap();

    let stored = reload(&dir);
    let matching: Vec<_> = stored.iter().filter(|c| c.id == first_id).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].messages.len(), 2);
    assert_eq!(matching[0].title, "Please summarize this very long documen…");
    assert!(chat.store().active().is_empty());
}

#[tokio::test]
async fn reopening_restores_most_recent_conversation() {
    let dir = TempDir::new().unwrap();
    {
        let mut chat = chat(
            file_store(&dir),
            ScriptedClient::new().reply("one").reply("two"),
        );
        chat.submit("first").await.unwrap();
        chat.new_conversation().unwrap();
        chat.submit("second").await.unwrap();
    }

    let reopened = chat(file_store(&dir), ScriptedClient::new());
    assert_eq!(reopened.store().conversations().len(), 2);
    assert_eq!(
        reopened.view().transcript,
        vec![MessageView::user("second"), MessageView::bot("two")]
    );
    assert!(reopened.view().history[1].is_active);
}

#[tokio::test]
async fn deleting_active_falls_back_to_last_remaining() {
    let dir = TempDir::new().unwrap();
    let mut chat = chat(
        file_store(&dir),
        ScriptedClient::new().reply("a").reply("b").reply("c"),
    );
    chat.submit("one").await.unwrap();
    chat.new_conversation().unwrap();
    chat.submit("two").await.unwrap();
    let second = chat.store().active().id.clone();
    chat.new_conversation().unwrap();
    chat.submit("three").await.unwrap();
    let third = chat.store().active().id.clone();

    chat.delete(&third).unwrap();

    let stored = reload(&dir);
    assert_eq!(stored.len(), 2);
    assert_eq!(chat.store().active().id, second);
    assert_eq!(stored.iter().filter(|c| c.id == second).count(), 1);
}

#[tokio::test]
async fn deleting_sole_conversation_leaves_empty_list() {
    let dir = TempDir::new().unwrap();
    let mut chat = chat(file_store(&dir), ScriptedClient::new().reply("hi"));
    chat.submit("only").await.unwrap();

    chat.delete("1").unwrap();

    assert!(reload(&dir).is_empty());
    assert!(chat.store().active().is_empty());
    assert!(chat.view().transcript.is_empty());
    assert!(chat.view().history.is_empty());
}

#[test]
fn corrupted_storage_starts_fresh() {
    let backend = MemoryBackend::with_blob("[{\"id\": 5}]");
    let store = ConversationStore::open(Box::new(backend));
    assert!(store.conversations().is_empty());
    assert!(store.active().is_empty());
}

/// Serve one HTTP request with a canned status and body, returning the
/// request body that was received.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/chat", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            received.extend_from_slice(&buf[..n]);
            if n == 0 || request_complete(&received) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        let text = String::from_utf8(received).unwrap();
        text.split_once("\r\n\r\n")
            .map(|(_, body)| body.to_string())
            .unwrap_or_default()
    });

    (url, handle)
}

fn request_complete(received: &[u8]) -> bool {
    let text = String::from_utf8_lossy(received);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    body.len() >= length
}

#[tokio::test]
async fn http_client_posts_conversation_and_reads_result() {
    let (url, server) = serve_once("200 OK", r#"{"result":"**Hi** there"}"#).await;
    let client = HttpCompletionClient::new(&url, Duration::from_secs(5)).unwrap();

    let messages = vec![natter::core::Message::new(Role::User, "Hello")];
    let reply = client.complete(&messages).await.unwrap();
    assert_eq!(reply.as_deref(), Some("**Hi** there"));

    let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"conversation": [{"role": "user", "text": "Hello"}]})
    );
}

#[tokio::test]
async fn http_client_reports_missing_result() {
    let (url, server) = serve_once("200 OK", "{}").await;
    let client = HttpCompletionClient::new(&url, Duration::from_secs(5)).unwrap();

    let reply = client
        .complete(&[natter::core::Message::new(Role::User, "Hello")])
        .await
        .unwrap();
    assert!(reply.is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn http_client_reports_error_status() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;
    let client = HttpCompletionClient::new(&url, Duration::from_secs(5)).unwrap();

    let outcome = client
        .complete(&[natter::core::Message::new(Role::User, "Hello")])
        .await;
    assert!(matches!(outcome, Err(CompletionError::Status(500))));
    server.await.unwrap();
}

#[tokio::test]
async fn http_client_reports_undecodable_body() {
    let (url, server) = serve_once("200 OK", "not json").await;
    let client = HttpCompletionClient::new(&url, Duration::from_secs(5)).unwrap();

    let outcome = client
        .complete(&[natter::core::Message::new(Role::User, "Hello")])
        .await;
    assert!(matches!(outcome, Err(CompletionError::Decode(_))));
    server.await.unwrap();
}
