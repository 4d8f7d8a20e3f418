//! Outbound WhatsApp messaging.
//!
//! This crate owns the dispatch side of the responder:
//! - **Addresses** (`address`) - `whatsapp:<E.164>` sender/recipient parsing
//! - **Dispatch** (`dispatch`) - `MessageDispatcher` trait plus a noop transport
//! - **Twilio** (`twilio`) - REST client for the Twilio Messages API
//!
//! Dispatch is fire-and-forget per request: one bounded-timeout HTTP call, no
//! retries, no queue. A failed dispatch is reported to the caller as a generic
//! internal error by the HTTP layer.

pub mod address;
pub mod dispatch;
pub mod twilio;

pub use address::{parse_sender, WhatsappAddress, WHATSAPP_SCHEME};
pub use dispatch::{DispatchError, MessageDispatcher, NoopDispatcher, OutboundMessage};
pub use twilio::TwilioDispatcher;
