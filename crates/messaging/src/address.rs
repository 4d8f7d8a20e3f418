use preventivo_core::WebhookError;

/// Scheme marker Twilio puts in front of WhatsApp phone numbers.
pub const WHATSAPP_SCHEME: &str = "whatsapp:";

/// A validated `whatsapp:<number>` address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhatsappAddress(String);

impl WhatsappAddress {
    pub fn parse(raw: &str) -> Result<Self, WebhookError> {
        let trimmed = raw.trim();
        let number = trimmed.strip_prefix(WHATSAPP_SCHEME).ok_or(WebhookError::InvalidSenderFormat)?;
        if number.is_empty() {
            return Err(WebhookError::InvalidSenderFormat);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WhatsappAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate the webhook `From` field. Presence is checked before format, since
/// an absent sender cannot be format-checked.
pub fn parse_sender(raw: Option<&str>) -> Result<WhatsappAddress, WebhookError> {
    match raw {
        None => Err(WebhookError::MissingSender),
        Some(value) if value.trim().is_empty() => Err(WebhookError::MissingSender),
        Some(value) => WhatsappAddress::parse(value),
    }
}
