//! Chat-completion client surface used by the Jinny issue responder.
mod openai;
mod types;

pub use openai::{OpenAiClient, OpenAiConfig, DEFAULT_OPENAI_API_BASE};
pub use types::{
    ChatRequest, ChatResponse, ChatUsage, JinnyAiError, LlmClient, Message, MessageRole,
};
