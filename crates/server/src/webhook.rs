use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use loanbot_agent::protocol::{ActionCall, ActionResponse};
use loanbot_agent::runtime::ActionRuntime;
use loanbot_core::InterfaceError;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

#[derive(Clone)]
pub struct WebhookState {
    runtime: Arc<ActionRuntime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WebhookError {
    pub error: String,
    pub detail: String,
    pub action_name: String,
    pub correlation_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub name: &'static str,
}

pub fn router(runtime: Arc<ActionRuntime>) -> Router {
    Router::new()
        .route("/webhook", post(run_action))
        .route("/actions", get(list_actions))
        .with_state(WebhookState { runtime })
}

pub async fn run_action(
    State(state): State<WebhookState>,
    Json(call): Json<ActionCall>,
) -> Result<Json<ActionResponse>, (StatusCode, Json<WebhookError>)> {
    match state.runtime.handle(&call).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => {
            let interface = error.into_interface(Uuid::new_v4().to_string());
            warn!(
                event_name = "action.webhook.rejected",
                correlation_id = interface.correlation_id(),
                action = %call.next_action,
                sender_id = %call.sender_id,
                error = %interface,
                "action call rejected"
            );
            Err((status_for(&interface), Json(webhook_error(&interface, call.next_action))))
        }
    }
}

pub async fn list_actions(State(state): State<WebhookState>) -> Json<Vec<ActionDescriptor>> {
    Json(state.runtime.action_names().into_iter().map(|name| ActionDescriptor { name }).collect())
}

fn status_for(error: &InterfaceError) -> StatusCode {
    match error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn webhook_error(error: &InterfaceError, action_name: String) -> WebhookError {
    WebhookError {
        error: error.user_message().to_string(),
        detail: error.to_string(),
        action_name,
        correlation_id: error.correlation_id().to_string(),
    }
}
