//! HTTP surface of the relay.
//!
//! Each handler is stateless between requests: all state lives in the
//! remote store behind `RelayService`. Failures are converted into
//! well-formed payloads here; nothing propagates as an unhandled error.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::SmsRelayError;
use crate::models::{InboundReply, SendSmsRequest, SendSmsResponse};
use crate::render;
use crate::service::RelayService;

/// Empty TwiML acknowledgement expected by the provider
const REPLY_ACK: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#;

/// TwiML acknowledgement carrying a failure notice
const REPLY_ACK_FAILED: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "<Response><Message>Sorry, your reply could not be recorded.</Message></Response>",
);

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Relay orchestrator over the gateway and store
    pub service: Arc<RelayService>,
}

/// Build the application router with CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/send-sms", post(send_sms))
        .route("/conversations", get(conversations))
        .route("/receive-reply", post(receive_reply))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the landing page
async fn home() -> Html<String> {
    Html(render::landing_page())
}

/// Dispatch one outbound SMS and report the provider sid
async fn send_sms(
    State(state): State<AppState>,
    Json(request): Json<SendSmsRequest>,
) -> Response {
    match state.service.dispatch(&request).await {
        Ok(receipt) => Json(SendSmsResponse::sent(&receipt)).into_response(),
        Err(e) => dispatch_error_response(&e),
    }
}

/// Map dispatch failures onto the JSON error envelope.
///
/// Validation and gateway failures are client errors; a store failure after
/// a successful send is a server error (the SMS is already out).
fn dispatch_error_response(error: &SmsRelayError) -> Response {
    let status = match error {
        SmsRelayError::Validation(_) | SmsRelayError::Gateway(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(SendSmsResponse::failed(error.to_string()))).into_response()
}

/// Render the conversation view; a store read failure degrades to an empty
/// list and never an error status
async fn conversations(State(state): State<AppState>) -> Html<String> {
    let messages = state.service.list_messages().await;
    Html(render::conversation_page(&messages))
}

/// Accept the provider's reply webhook.
///
/// The provider expects HTTP 200 with TwiML either way; an insert failure is
/// reported inside the markup, never as an HTTP error.
async fn receive_reply(
    State(state): State<AppState>,
    Form(reply): Form<InboundReply>,
) -> Response {
    let body = match state.service.record_reply(&reply).await {
        Ok(()) => REPLY_ACK,
        Err(e) => {
            warn!("Failed to record inbound reply: {e}");
            REPLY_ACK_FAILED
        }
    };

    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}
