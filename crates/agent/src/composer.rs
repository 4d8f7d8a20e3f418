use std::sync::Arc;

use preventivo_core::replies::{APOLOGY, GREETING, GUIDED_PROMPT, QUOTE_TRIGGER};
use tracing::warn;

use crate::llm::LlmClient;

/// Role prompt for the generative variant. The assistant must collect the same
/// three data points the guided prompt asks for.
const SYSTEM_PROMPT: &str = "Sei un assistente WhatsApp per i preventivi di lavori artigianali. \
Rispondi in italiano, in modo breve e cordiale. Per preparare un preventivo devi ottenere \
tre informazioni dal cliente: le ore di lavoro stimate, il costo dei materiali e se il \
lavoro è semplice, medio o complesso. Non inventare mai prezzi.";

/// Picks the reply for one inbound message. Stateless: no memory of prior turns
/// per sender, every invocation is a single pass.
pub struct ReplyComposer {
    llm: Option<Arc<dyn LlmClient>>,
}

impl ReplyComposer {
    pub fn fixed() -> Self {
        Self { llm: None }
    }

    pub fn generative(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm: Some(llm) }
    }

    pub fn is_generative(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn compose(&self, body: &str) -> String {
        match &self.llm {
            None => select_fixed_reply(body).to_string(),
            Some(llm) => match llm.complete(SYSTEM_PROMPT, body).await {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    warn!(event_name = "agent.compose.empty_completion", "completion was empty, using apology fallback");
                    APOLOGY.to_string()
                }
                Err(error) => {
                    warn!(
                        event_name = "agent.compose.completion_failed",
                        error = %error,
                        "completion failed, using apology fallback"
                    );
                    APOLOGY.to_string()
                }
            },
        }
    }
}

/// Static routing: the "preventivo" keyword selects the guided prompt.
pub fn select_fixed_reply(body: &str) -> &'static str {
    if normalize(body).contains(QUOTE_TRIGGER) {
        GUIDED_PROMPT
    } else {
        GREETING
    }
}

fn normalize(body: &str) -> String {
    body.trim().to_lowercase()
}
