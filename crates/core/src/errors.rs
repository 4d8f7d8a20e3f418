use thiserror::Error;

/// Validation failures on the inbound webhook payload. These are the only
/// failures surfaced to the caller with a precise message; everything else is
/// flattened to a generic internal error at the HTTP boundary so provider
/// internals and credentials never leak.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("campo `From` mancante o vuoto")]
    MissingSender,
    #[error("campo `From` non valido: atteso un indirizzo `whatsapp:<numero>`")]
    InvalidSenderFormat,
}

impl WebhookError {
    /// Message safe to echo back to the webhook caller.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
