//! Wire contract of `HttpBackend` against a loopback HTTP listener.

use prospera::api::{ApiClient, ApiError, FinanceBackend, HttpBackend};
use prospera::config::ClientConfig;
use prospera::session::SessionHandle;
use prospera::types::{Session, VisualizeResponse};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug)]
struct CapturedRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

struct Reply {
    status: u16,
    headers: Vec<(&'static str, &'static str)>,
    body: String,
}

impl Reply {
    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: vec![("content-type", "application/json")],
            body: body.to_string(),
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("content-type", "text/plain")],
            body: body.to_string(),
        }
    }

    fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// Answer one connection per reply, in order, and hand back what was received.
fn serve(replies: Vec<Reply>) -> (String, JoinHandle<Vec<CapturedRequest>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        replies
            .into_iter()
            .map(|reply| {
                let (stream, _) = listener.accept().unwrap();
                answer(stream, reply)
            })
            .collect()
    });
    (origin, handle)
}

fn answer(mut stream: TcpStream, reply: Reply) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).unwrap();

    let reason = match reply.status {
        200 => "OK",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let mut response = format!(
        "HTTP/1.1 {} {reason}\r\ncontent-length: {}\r\nconnection: close\r\n",
        reply.status,
        reply.body.len()
    );
    for (name, value) in &reply.headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(&reply.body);
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();

    CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

fn backend(origin: &str) -> HttpBackend {
    let config = ClientConfig::new(&format!("{origin}/api"), None).unwrap();
    HttpBackend::new(config).unwrap()
}

fn insights_body() -> Value {
    json!({
        "insights": [
            { "type": "net_worth", "title": "Net Worth", "value": "₹8,40,000" }
        ],
        "quick_actions": [
            { "label": "Spending", "query": "How much did I spend last month?" }
        ],
        "timestamp": "2024-08-01T10:00:00"
    })
}

#[tokio::test]
async fn test_login_is_form_encoded_and_sets_session_cookie() {
    let (origin, server) = serve(vec![
        Reply::json(200, json!({ "status": "success" }))
            .with_header("set-cookie", "session=abc123; Path=/"),
        Reply::json(200, insights_body()),
    ]);
    let backend = backend(&origin);

    let login = backend.login("1111111111", "2222222222").await.unwrap();
    assert_eq!(login, json!({ "status": "success" }));
    let insights = backend.quick_insights().await.unwrap();
    assert_eq!(
        insights.quick_actions[0].query,
        "How much did I spend last month?"
    );

    let requests = server.join().unwrap();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/login");
    assert_eq!(
        requests[0].header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        requests[0].body,
        "sessionId=1111111111&phoneNumber=2222222222"
    );

    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, "/api/quick-insights");
    assert!(
        requests[1]
            .header("cookie")
            .is_some_and(|cookie| cookie.contains("session=abc123"))
    );
}

#[tokio::test]
async fn test_ask_ai_posts_json_query() {
    let (origin, server) = serve(vec![Reply::json(
        200,
        json!({
            "query": "What's my net worth?",
            "response": { "net_worth": "₹8,40,000" },
            "analysis": { "intent": "net_worth", "data_sources_used": ["net_worth"] },
            "performance": {
                "apis_called": 1,
                "selective_fetching": true,
                "response_optimized": true
            },
            "timestamp": "2024-08-01T10:00:00"
        }),
    )]);

    let reply = backend(&origin)
        .ask_ai("What's my net worth?")
        .await
        .unwrap();
    assert_eq!(reply.response, json!({ "net_worth": "₹8,40,000" }));
    assert_eq!(reply.performance.apis_called, 1);

    let requests = server.join().unwrap();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/ask-ai");
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "query": "What's my net worth?" }));
}

#[tokio::test]
async fn test_visualize_error_field_is_a_domain_error() {
    let (origin, server) = serve(vec![Reply::json(
        200,
        json!({ "error": "No investment data found" }),
    )]);

    let reply = backend(&origin)
        .visualize("Show my investment portfolio allocation")
        .await
        .unwrap();
    assert_eq!(
        reply,
        VisualizeResponse::Error("No investment data found".to_string())
    );

    let requests = server.join().unwrap();
    assert_eq!(requests[0].path, "/api/visualize");
    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({ "query": "Show my investment portfolio allocation" })
    );
}

#[tokio::test]
async fn test_health_check_hits_server_root() {
    let (origin, server) = serve(vec![Reply::text(200, "OK")]);

    let health = backend(&origin).health_check().await.unwrap();
    assert_eq!(health, Value::String("OK".to_string()));

    let requests = server.join().unwrap();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/health");
}

#[tokio::test]
async fn test_unauthorized_response_resets_session() {
    let (origin, server) = serve(vec![Reply::json(
        401,
        json!({ "error": "session expired" }),
    )]);
    let session = SessionHandle::new();
    session.establish(Session {
        session_id: "9999999999".to_string(),
        phone_number: "9999999999".to_string(),
    });
    let api = ApiClient::new(Arc::new(backend(&origin)), session.clone());

    let err = api.net_worth().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!session.is_active());

    let requests = server.join().unwrap();
    assert_eq!(requests[0].path, "/api/net_worth");
}

#[tokio::test]
async fn test_server_error_keeps_body() {
    let (origin, server) = serve(vec![Reply::text(500, "boom")]);

    let err = backend(&origin).transactions().await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected {other:?}"),
    }

    let requests = server.join().unwrap();
    assert_eq!(requests[0].path, "/api/transactions");
}

#[tokio::test]
async fn test_malformed_typed_body_is_a_decode_error() {
    let (origin, server) = serve(vec![Reply::text(200, "<html>maintenance</html>")]);

    let err = backend(&origin).quick_insights().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));

    server.join().unwrap();
}
