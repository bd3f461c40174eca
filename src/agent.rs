use crate::cli::Args;
use crate::llm::chat::{new_client as new_chat_client, ChatClient};
use crate::llm::{parse_llm_type, LlmConfig};
use crate::models::chat::{ChatMessage, Role};
use crate::session::AnswerSource;

use async_trait::async_trait;
use log::info;
use std::error::Error;
use std::sync::Arc;

/// Bridges the session controller to the configured LLM provider. The
/// knowledge-base text is injected into the prompt on every call, so edits
/// through the admin API take effect on the next question.
pub struct CivicAgent {
    chat_client: Arc<dyn ChatClient>,
}

impl CivicAgent {
    pub fn new(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_llm_type = parse_llm_type(&args.chat_llm_type)?;
        let chat_api_key = if !args.chat_api_key.is_empty() {
            Some(args.chat_api_key.clone())
        } else {
            None
        };
        let chat_config = LlmConfig {
            llm_type: chat_llm_type,
            base_url: args.chat_base_url.clone(),
            api_key: chat_api_key,
            completion_model: args.chat_model.clone(),
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Type={}, Model={:?}, BaseURL={:?}",
            args.chat_llm_type,
            chat_config.completion_model.as_deref().unwrap_or("adapter default"),
            chat_config.base_url.as_deref().unwrap_or("adapter default")
        );

        Ok(Self { chat_client })
    }

    #[cfg(test)]
    pub fn with_client(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }
}

pub fn format_history_for_prompt(history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let mut result = String::from("Previous conversation:\n");
    for msg in history {
        let role_display = match msg.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        result.push_str(&format!("{}: {}\n", role_display, msg.text));
    }

    result
}

#[async_trait]
impl AnswerSource for CivicAgent {
    async fn generate_answer(
        &self,
        history: &[ChatMessage],
        question: &str,
        context: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let history_str = format_history_for_prompt(history);
        let prompt = if history_str.is_empty() {
            format!("{}\n\nUser: {}", context, question)
        } else {
            format!("{}\n\n{}\nUser: {}", context, history_str, question)
        };

        let resp = self.chat_client.complete(&prompt).await?;
        Ok(resp.response)
    }
}
