use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use shared::llm::{LlmGateway, PromptTemplate};
use shared::sessions::SessionStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod chat;
mod errors;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub llm: Arc<dyn LlmGateway>,
    pub prompt: PromptTemplate,
}

impl AppState {
    pub fn new(sessions: SessionStore, llm: Arc<dyn LlmGateway>) -> Self {
        Self {
            sessions,
            llm,
            prompt: PromptTemplate::default(),
        }
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/chat", post(chat::chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
