use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// In-process stand-in for an OpenAI-compatible chat-completions endpoint.
pub struct MockProviderServer {
    pub base_url: String,
    seen_payloads: Arc<Mutex<Vec<Value>>>,
    handle: tokio::task::JoinHandle<()>,
}

#[derive(Clone)]
struct MockProviderState {
    status: StatusCode,
    body: Value,
    seen_payloads: Arc<Mutex<Vec<Value>>>,
}

impl MockProviderServer {
    pub async fn replying(content: &str) -> Self {
        Self::start(
            StatusCode::OK,
            json!({
                "id": "chatcmpl-mock",
                "model": "gpt-3.5-turbo",
                "choices": [
                    {
                        "index": 0,
                        "message": { "role": "assistant", "content": content },
                        "finish_reason": "stop"
                    }
                ]
            }),
        )
        .await
    }

    pub async fn failing(status: StatusCode, code: &str) -> Self {
        Self::start(
            status,
            json!({
                "error": {
                    "message": "mock provider failure",
                    "type": "server_error",
                    "code": code
                }
            }),
        )
        .await
    }

    async fn start(status: StatusCode, body: Value) -> Self {
        let seen_payloads = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(MockProviderState {
                status,
                body,
                seen_payloads: Arc::clone(&seen_payloads),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock provider listener should bind");
        let bind_addr = listener
            .local_addr()
            .expect("mock provider listener local address should exist");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock provider server should run");
        });

        Self {
            base_url: format!("http://{bind_addr}"),
            seen_payloads,
            handle,
        }
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    pub async fn seen_payloads(&self) -> Vec<Value> {
        self.seen_payloads.lock().await.clone()
    }
}

impl Drop for MockProviderServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn chat_completions(
    State(state): State<MockProviderState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.seen_payloads.lock().await.push(payload);
    (state.status, Json(state.body))
}
