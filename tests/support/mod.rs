//! Scripted HTTP fixture for tests that need per-attempt responses and
//! request capture (the 401 retry sequence cannot be expressed with a
//! single static mock).

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One canned response, served in arrival order.
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }
}

/// What one request looked like on the wire.
#[derive(Clone, Debug)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub traceparent: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone)]
struct Script {
    responses: Arc<Mutex<Vec<Canned>>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

pub struct ScriptedServer {
    pub base_url: String,
    script: Script,
    handle: JoinHandle<()>,
}

impl ScriptedServer {
    pub async fn start(responses: Vec<Canned>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fixture");
        let addr = listener.local_addr().expect("fixture addr");
        let script = Script {
            responses: Arc::new(Mutex::new(responses)),
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new().fallback(respond).with_state(script.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fixture");
        });
        Self {
            base_url: format!("http://{addr}"),
            script,
            handle,
        }
    }

    /// Requests observed so far, in arrival order.
    pub fn requests(&self) -> Vec<Seen> {
        self.script.seen.lock().unwrap().clone()
    }
}

impl Drop for ScriptedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(
    State(script): State<Script>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    script.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        traceparent: header("traceparent"),
        content_type: header("content-type"),
    });

    let next = {
        let mut responses = script.responses.lock().unwrap();
        if responses.is_empty() {
            None
        } else {
            Some(responses.remove(0))
        }
    };

    match next {
        Some(canned) => (
            StatusCode::from_u16(canned.status).expect("scripted status"),
            [("content-type", canned.content_type)],
            canned.body,
        )
            .into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "script exhausted").into_response(),
    }
}
