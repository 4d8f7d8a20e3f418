use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::address::WhatsappAddress;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("dispatch client could not be constructed: {0}")]
    Client(String),
    #[error("dispatch request failed: {0}")]
    Http(String),
    #[error("dispatch request timed out: {0}")]
    Timeout(String),
    #[error("provider rejected the message (status {status}): {detail}")]
    Api { status: u16, detail: String },
}

/// One outbound reply, addressed and ready to send. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: WhatsappAddress,
    pub to: WhatsappAddress,
    pub body: String,
}

#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    async fn dispatch(&self, message: &OutboundMessage) -> Result<(), DispatchError>;

    /// Transport label for health reporting.
    fn transport(&self) -> &'static str;
}

/// Accepts every message without doing I/O. Used for smoke runs and tests.
#[derive(Default)]
pub struct NoopDispatcher;

#[async_trait]
impl MessageDispatcher for NoopDispatcher {
    async fn dispatch(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
        debug!(to = %message.to, "noop dispatcher dropped outbound message");
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "noop"
    }
}
