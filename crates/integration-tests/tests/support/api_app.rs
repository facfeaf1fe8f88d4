use std::sync::Arc;

use api_server::http::{AppState, build_router};
use shared::llm::LlmGateway;
use shared::sessions::SessionStore;

pub fn build_test_router(sessions: SessionStore, llm: Arc<dyn LlmGateway>) -> axum::Router {
    build_router(AppState::new(sessions, llm))
}
