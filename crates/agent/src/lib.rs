//! Reply composition for the WhatsApp quote assistant.
//!
//! Each inbound message gets exactly one reply, chosen in a single pass with no
//! conversation memory:
//! - keyword routing (`composer`) - "preventivo" in the message selects the
//!   guided quote prompt, anything else the greeting
//! - generative variant (`llm`) - when an API key is configured, the reply is
//!   produced by a chat-completion provider under a fixed Italian system prompt;
//!   provider failures fall back to a static apology and never propagate
//!
//! The LLM is strictly a copywriter here. Prices are computed only by the
//! deterministic calculator in `preventivo-core`.

pub mod composer;
pub mod llm;

pub use composer::ReplyComposer;
pub use llm::{LlmClient, OpenAiClient};
