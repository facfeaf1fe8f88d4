/// Instruction sent as the system turn of every chat request.
pub const SHOPPING_ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful shopping assistant that helps users create personalized grocery shopping carts. Ask relevant questions about their preferences, dietary restrictions, and shopping needs. Keep responses concise and focused on grocery shopping.";

pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 150;

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub system_prompt: &'static str,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        shopping_assistant_template()
    }
}

pub fn shopping_assistant_template() -> PromptTemplate {
    PromptTemplate {
        system_prompt: SHOPPING_ASSISTANT_SYSTEM_PROMPT,
        temperature: CHAT_TEMPERATURE,
        max_tokens: CHAT_MAX_TOKENS,
    }
}
