pub mod config;
pub mod errors;
pub mod integrity;
pub mod pricing;
pub mod replies;

pub use errors::WebhookError;
pub use integrity::tag;
pub use pricing::{compute_quote, PricingConfig, QuoteRequest, QuoteResult};
