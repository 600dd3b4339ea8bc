//! HttpChatBackend against a canned local HTTP server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rezzy_core::chat::ResponsePayload;
use rezzy_core::config::{ClientConfig, RetryPolicy};
use rezzy_core::error::RezzyError;
use rezzy_interaction::{ChatBackend, HttpChatBackend};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
struct RecordedRequest {
    request_line: String,
    body: String,
}

/// Serves `responses` in order, one per connection; the last one repeats.
struct CannedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            let mut served = 0usize;
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let (status, body) = responses[served.min(responses.len() - 1)];
                served += 1;
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    handle(stream, status, body, recorded).await;
                });
            }
        });

        Self { base_url, requests }
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn backend(&self, retry: RetryPolicy) -> HttpChatBackend {
        HttpChatBackend::from_config(&ClientConfig {
            api_base_url: self.base_url.clone(),
            timeout_secs: 5,
            retry,
            ..ClientConfig::default()
        })
        .unwrap()
    }
}

async fn handle(
    mut stream: TcpStream,
    status: u16,
    body: &'static str,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    recorded.lock().unwrap().push(RecordedRequest {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    });

    let response = format!(
        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}

#[tokio::test]
async fn test_process_query_sends_session_and_parses_envelope() {
    let server = CannedServer::start(vec![(
        200,
        r#"{"response": [{"fact": "F", "response": "R"}, {"front": "Q", "back": "A"}], "chat_session_id": "s-42", "response_number": 3}"#,
    )])
    .await;
    let backend = server.backend(RetryPolicy::none());

    let reply = backend
        .process_query("What is the patella?", Some("s-42"))
        .await
        .unwrap();

    assert_eq!(reply.chat_session_id.as_deref(), Some("s-42"));
    assert_eq!(reply.response_number, Some(3));
    assert!(matches!(reply.payload, ResponsePayload::Many(ref items) if items.len() == 2));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.starts_with("POST /process_query "));
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["question"], "What is the patella?");
    assert_eq!(body["chat_session_id"], "s-42");
}

#[tokio::test]
async fn test_process_query_without_session_omits_id() {
    let server = CannedServer::start(vec![(200, r#"{"fact": "F", "response": "R"}"#)]).await;
    let backend = server.backend(RetryPolicy::none());

    let reply = backend.process_query("Hello", None).await.unwrap();
    assert!(reply.chat_session_id.is_none());
    assert!(matches!(reply.payload, ResponsePayload::Single(_)));

    let body: serde_json::Value = serde_json::from_str(&server.requests()[0].body).unwrap();
    assert!(body.get("chat_session_id").is_none());
}

#[tokio::test]
async fn test_list_sessions_and_detail() {
    let server = CannedServer::start(vec![
        (
            200,
            r#"{"chat_sessions": [{"chat_session_id": "a", "title": "Bones", "created_at": "2024-01-01T10:00:00", "updated_at": "2024-01-01T11:00:00", "response_count": 2}],
                "pagination": {"current_page": 1, "total_pages": 1, "total_count": 1, "limit": 10, "has_next": false, "has_prev": false}}"#,
        ),
        (
            200,
            r#"{"chat_session_id": "a", "title": "Bones", "created_at": "2024-01-01T10:00:00", "conversations": [{"Q1": {"fact": "F", "response": "R"}}]}"#,
        ),
    ])
    .await;
    let backend = server.backend(RetryPolicy::none());

    let page = backend.list_sessions(1, 10).await.unwrap();
    assert_eq!(page.chat_sessions.len(), 1);
    assert_eq!(page.chat_sessions[0].response_count, 2);

    let session = backend.session_detail("a").await.unwrap();
    assert_eq!(session.session_id, "a");
    assert_eq!(session.conversations.len(), 1);

    let requests = server.requests();
    assert!(requests[0].request_line.starts_with("GET /chat_sessions?page=1&limit=10 "));
    assert!(requests[1].request_line.starts_with("GET /chat_sessions/a "));
}

#[tokio::test]
async fn test_not_found_maps_to_http_error() {
    let server = CannedServer::start(vec![(404, r#"{"detail": "Chat session not found"}"#)]).await;
    let backend = server.backend(RetryPolicy::default());

    let err = backend.session_detail("missing").await.unwrap_err();
    assert_eq!(
        err,
        RezzyError::Http {
            status: 404,
            message: "Chat session not found".into()
        }
    );
    // 4xx is not retried
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = CannedServer::start(vec![
        (503, r#"{"detail": "warming up"}"#),
        (200, r#"{"status": "healthy", "timestamp": "2024-01-01T00:00:00"}"#),
    ])
    .await;
    let backend = server.backend(RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 10,
    });

    let health = backend.health_check().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let server = CannedServer::start(vec![(200, "42")]).await;
    let backend = server.backend(RetryPolicy::none());

    let err = backend.process_query("q", None).await.unwrap_err();
    assert!(err.is_invalid_payload());
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let backend = HttpChatBackend::from_config(&ClientConfig {
        api_base_url: base_url,
        timeout_secs: 1,
        retry: RetryPolicy::none(),
        ..ClientConfig::default()
    })
    .unwrap();

    let started = std::time::Instant::now();
    let err = backend.health_check().await.unwrap_err();
    assert_eq!(err, RezzyError::Timeout { seconds: 1 });
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let backend = HttpChatBackend::from_config(&ClientConfig {
        api_base_url: base_url,
        retry: RetryPolicy::none(),
        ..ClientConfig::default()
    })
    .unwrap();

    let err = backend.process_query("q", None).await.unwrap_err();
    assert!(matches!(err, RezzyError::NetworkFailure { .. }));
    assert!(err.is_transport());
}
