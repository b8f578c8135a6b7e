//! Webhook dispatch routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use tracing::error;

use grantlink_core::{MembershipReconciler, OrgDirectory, OrgEnumerator};
use grantlink_types::{ApplyUpdateResponse, WebhookRequest};

use crate::signature::{verify_signature, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Shared state for the webhook handler.
#[derive(Clone)]
pub struct BridgeState {
    enumerator: Arc<OrgEnumerator<Arc<dyn OrgDirectory>>>,
    reconciler: Arc<MembershipReconciler<Arc<dyn OrgDirectory>>>,
    webhook_secret: Arc<SecretString>,
}

impl BridgeState {
    /// Create the handler state over a directory implementation.
    pub fn new(
        directory: Arc<dyn OrgDirectory>,
        org: impl Into<String>,
        webhook_secret: SecretString,
    ) -> Self {
        Self {
            enumerator: Arc::new(OrgEnumerator::new(directory.clone(), org)),
            reconciler: Arc::new(MembershipReconciler::new(directory)),
            webhook_secret: Arc::new(webhook_secret),
        }
    }
}

/// Creates the bridge router.
pub fn bridge_router(state: BridgeState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Dispatches an inbound webhook to the enumerator or the reconciler.
///
/// Authentication and envelope failures are answered here with
/// transport-level errors; core outcomes are serialized into the body
/// and mapped to 200/500 by their status code.
async fn webhook_handler(
    State(state): State<BridgeState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    let timestamp = headers.get(TIMESTAMP_HEADER).and_then(|v| v.to_str().ok());

    if !verify_signature(&state.webhook_secret, signature, timestamp, &body) {
        error!("webhook signature verification failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "invalid auth").into_response();
    }

    let request = match serde_json::from_slice::<WebhookRequest>(&body) {
        Ok(request) => request,
        Err(_) => {
            error!("envelope carries neither kinds nor events");
            return (StatusCode::INTERNAL_SERVER_ERROR, "unknown request").into_response();
        }
    };

    match request {
        WebhookRequest::Pull(pull) => match state.enumerator.pull(&pull.kinds).await {
            Ok(response) => Json(response).into_response(),
            Err(e) => {
                error!(error = %e, "enumeration failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        },
        WebhookRequest::Apply(apply) => {
            let status = state.reconciler.apply(&apply.events).await;
            let http_status = if status.is_success() {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (http_status, Json(ApplyUpdateResponse { status })).into_response()
        }
    }
}
