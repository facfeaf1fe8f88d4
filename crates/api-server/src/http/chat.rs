use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use shared::llm::{LlmGatewayRequest, LlmGatewayResponse};
use shared::models::{ChatRequest, ChatRequestError};
use tracing::{debug, info, warn};

use super::AppState;
use super::errors::{chat_failure_response, chat_success_response, missing_message_response};

pub(super) async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection, "chat request body rejected");
            return chat_failure_response(rejection.body_text());
        }
    };

    let message = match req.message() {
        Ok(message) => message,
        Err(ChatRequestError::MissingMessage) => return missing_message_response(),
        Err(err) => {
            warn!(error = %err, "chat request message rejected");
            return chat_failure_response(err.to_string());
        }
    };
    let user_id = req.user_id();

    // Held until the exchange finishes so same-user requests never interleave.
    let mut session = state.sessions.lock(user_id).await;
    // `message` is non-empty here, so the session accepts it.
    if let Err(err) = session.append_user_message(message) {
        warn!(user_id = %user_id, error = %err, "chat user turn rejected");
        return missing_message_response();
    }

    let request = LlmGatewayRequest::with_system_prompt(
        state.prompt.system_prompt,
        session.history(),
        state.prompt.temperature,
        state.prompt.max_tokens,
    )
    .with_requester_id(user_id);

    match state.llm.generate(request).await {
        Ok(response) => {
            session.append_assistant_message(&response.content);
            log_exchange(user_id, session.len(), &response);
            chat_success_response(response.content)
        }
        Err(err) => {
            // The user turn stays in history; only the assistant turn is skipped.
            warn!(
                user_id = %user_id,
                history_len = session.len(),
                error = %err,
                "chat model request failed"
            );
            chat_failure_response(err.to_string())
        }
    }
}

fn log_exchange(user_id: &str, history_len: usize, response: &LlmGatewayResponse) {
    info!(
        user_id = %user_id,
        history_len,
        model = %response.model,
        "chat exchange completed"
    );

    if let Some(usage) = response.usage.as_ref() {
        debug!(
            user_id = %user_id,
            provider_request_id = response.provider_request_id.as_deref().unwrap_or("none"),
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "chat model token usage"
        );
    }
}
