pub mod gateway;
pub mod openai;
pub mod prompts;

pub use gateway::{
    LlmGateway, LlmGatewayError, LlmGatewayFuture, LlmGatewayRequest, LlmGatewayResponse,
    LlmTokenUsage,
};
pub use openai::OpenAiGateway;
pub use prompts::{
    CHAT_MAX_TOKENS, CHAT_TEMPERATURE, PromptTemplate, SHOPPING_ASSISTANT_SYSTEM_PROMPT,
    shopping_assistant_template,
};
