use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::{ChatFailureResponse, ChatResponse, ErrorResponse};

pub(super) const MISSING_MESSAGE_ERROR: &str = "No message provided";

pub(super) fn chat_success_response(message: String) -> Response {
    (
        StatusCode::OK,
        Json(ChatResponse {
            success: true,
            message,
        }),
    )
        .into_response()
}

pub(super) fn missing_message_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: MISSING_MESSAGE_ERROR.to_string(),
        }),
    )
        .into_response()
}

/// Catch-all for upstream and unclassified failures. The error text is
/// returned to the caller unchanged.
pub(super) fn chat_failure_response(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatFailureResponse {
            success: false,
            error,
        }),
    )
        .into_response()
}
