use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::routes::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub transport: &'static str,
    pub generative: bool,
    pub checked_at: String,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let payload = HealthResponse {
        status: "ready",
        transport: state.dispatcher.transport(),
        generative: state.composer.is_generative(),
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use preventivo_agent::ReplyComposer;
    use preventivo_core::pricing::PricingConfig;
    use preventivo_messaging::{NoopDispatcher, WhatsappAddress};

    use super::health;
    use crate::routes::AppState;

    #[tokio::test]
    async fn health_reports_transport_and_reply_mode() {
        let state = AppState {
            dispatcher: Arc::new(NoopDispatcher),
            composer: Arc::new(ReplyComposer::fixed()),
            pricing: PricingConfig::default(),
            from_address: WhatsappAddress::parse("whatsapp:+14155238886").expect("from"),
        };

        let (status, payload) = health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.transport, "noop");
        assert!(!payload.generative);
    }
}
