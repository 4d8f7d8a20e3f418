use std::sync::Arc;

use preventivo_agent::{OpenAiClient, ReplyComposer};
use preventivo_core::config::{AppConfig, ConfigError, LoadOptions};
use preventivo_messaging::{
    DispatchError, MessageDispatcher, TwilioDispatcher, WhatsappAddress,
};
use thiserror::Error;
use tracing::info;

use crate::routes::AppState;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("outbound dispatcher could not be constructed: {0}")]
    Dispatcher(#[from] DispatchError),
    #[error("completion client could not be constructed: {0}")]
    Llm(#[source] anyhow::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Build the process-wide state once: every handler gets it injected, nothing
/// is read from ambient globals. Fails fast before the server binds.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let from_address = WhatsappAddress::parse(&config.twilio.from_address).map_err(|_| {
        ConfigError::Validation(
            "twilio.from_address must be a `whatsapp:<E.164>` address".to_string(),
        )
    })?;

    let dispatcher: Arc<dyn MessageDispatcher> = Arc::new(TwilioDispatcher::new(&config.twilio)?);

    let composer = if config.llm.enabled {
        let client = OpenAiClient::new(&config.llm).map_err(BootstrapError::Llm)?;
        ReplyComposer::generative(Arc::new(client))
    } else {
        ReplyComposer::fixed()
    };

    info!(
        event_name = "system.bootstrap.ready",
        correlation_id = "bootstrap",
        transport = dispatcher.transport(),
        generative = composer.is_generative(),
        "application bootstrap complete"
    );

    let state = AppState {
        dispatcher,
        composer: Arc::new(composer),
        pricing: config.pricing.clone(),
        from_address,
    };

    Ok(Application { config, state })
}
