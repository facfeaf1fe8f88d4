use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shared::llm::{
    LlmGateway, LlmGatewayError, LlmGatewayFuture, LlmGatewayRequest, LlmGatewayResponse,
};

#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    Fail(String),
    /// Answers with the content of the last message it was sent.
    Echo,
}

/// Scripted model gateway. Replies are consumed in order; once the script is
/// exhausted every call falls back to `StubReply::Echo`.
#[derive(Clone, Default)]
pub struct StubGateway {
    replies: Arc<Mutex<VecDeque<StubReply>>>,
    seen_requests: Arc<Mutex<Vec<LlmGatewayRequest>>>,
    delay: Option<Duration>,
}

impl StubGateway {
    pub fn with_replies(replies: Vec<StubReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::default()
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with_replies(vec![StubReply::Text(text.to_string())])
    }

    pub fn failing(error: &str) -> Self {
        Self::with_replies(vec![StubReply::Fail(error.to_string())])
    }

    pub fn echo_with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn seen_requests(&self) -> Vec<LlmGatewayRequest> {
        self.seen_requests
            .lock()
            .expect("stub gateway mutex should not be poisoned")
            .clone()
    }

    fn next_reply(&self) -> StubReply {
        self.replies
            .lock()
            .expect("stub gateway mutex should not be poisoned")
            .pop_front()
            .unwrap_or(StubReply::Echo)
    }
}

impl LlmGateway for StubGateway {
    fn generate<'a>(&'a self, request: LlmGatewayRequest) -> LlmGatewayFuture<'a> {
        Box::pin(async move {
            self.seen_requests
                .lock()
                .expect("stub gateway mutex should not be poisoned")
                .push(request.clone());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let content = match self.next_reply() {
                StubReply::Text(text) => text,
                StubReply::Fail(error) => return Err(LlmGatewayError::ProviderFailure(error)),
                StubReply::Echo => request
                    .messages
                    .last()
                    .map(|turn| format!("echo: {}", turn.content()))
                    .unwrap_or_default(),
            };

            Ok(LlmGatewayResponse {
                model: "stub-model".to_string(),
                provider_request_id: None,
                content,
                usage: None,
            })
        })
    }
}
