//! HTTP surface.
//!
//! - `POST /calcola_preventivo/` — JSON quote calculation
//! - `POST /whatsapp/`           — Twilio webhook callback (form-encoded)
//!
//! Validation failures on the webhook payload come back as 400 with a precise
//! message. Every other failure, dispatch included, is flattened to a generic
//! 500 by a single boundary: the real cause is logged with a correlation id and
//! never echoed to the caller.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use preventivo_agent::ReplyComposer;
use preventivo_core::{
    compute_quote, integrity, pricing::PricingConfig, QuoteRequest, QuoteResult, WebhookError,
};
use preventivo_messaging::{parse_sender, MessageDispatcher, OutboundMessage, WhatsappAddress};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

pub const STATUS_SENT: &str = "Messaggio inviato";
const INTERNAL_DETAIL: &str = "Errore interno";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn MessageDispatcher>,
    pub composer: Arc<ReplyComposer>,
    pub pricing: PricingConfig,
    pub from_address: WhatsappAddress,
}

#[derive(Debug, Deserialize)]
pub struct WebhookForm {
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "Body")]
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub hash: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Boundary error for the webhook handler. Only validation maps to a caller
/// error; everything else is an opaque 500.
#[derive(Debug)]
enum WebhookFailure {
    Validation(WebhookError),
    Internal,
}

impl IntoResponse for WebhookFailure {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(error) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { detail: error.user_message() }),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { detail: INTERNAL_DETAIL.to_string() }),
            )
                .into_response(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/calcola_preventivo/", post(calcola_preventivo))
        .route("/whatsapp/", post(whatsapp_webhook))
        .with_state(state)
}

async fn calcola_preventivo(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Json<QuoteResult> {
    let prezzo = compute_quote(&state.pricing, &request);
    info!(
        event_name = "quote.computed",
        complessita = request.complessita,
        prezzo = %prezzo,
        "quote computed"
    );
    Json(QuoteResult { prezzo_preventivato: prezzo, data: Utc::now().date_naive() })
}

async fn whatsapp_webhook(
    State(state): State<AppState>,
    Form(form): Form<WebhookForm>,
) -> Result<Json<WebhookAck>, WebhookFailure> {
    let correlation_id = Uuid::new_v4().to_string();

    let sender = parse_sender(form.from.as_deref()).map_err(|validation| {
        info!(
            event_name = "webhook.rejected",
            correlation_id = %correlation_id,
            reason = %validation,
            "inbound message rejected before dispatch"
        );
        WebhookFailure::Validation(validation)
    })?;

    let body = form.body.unwrap_or_default();
    let reply = state.composer.compose(&body).await;

    let message = OutboundMessage {
        from: state.from_address.clone(),
        to: sender,
        body: reply.clone(),
    };
    state.dispatcher.dispatch(&message).await.map_err(|cause| {
        // Logged server-side only. The caller gets the generic 500.
        error!(
            event_name = "webhook.dispatch_failed",
            correlation_id = %correlation_id,
            error = %cause,
            "outbound dispatch failed"
        );
        WebhookFailure::Internal
    })?;

    info!(
        event_name = "webhook.replied",
        correlation_id = %correlation_id,
        to = %message.to,
        "reply dispatched"
    );

    Ok(Json(WebhookAck { status: STATUS_SENT, hash: integrity::tag(&reply) }))
}
