//! Chat route handler for the shopping assistant.
//!
//! One request runs one dispatch cycle: the client sends the conversation so
//! far (its trailing message being the new user turn), and receives the
//! final reply plus the tool invocations and structured results the UI needs
//! to update the client-held cart.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::assistant::{DispatchService, Message, ToolInvocation};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Build the chat router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(send_message))
}

/// One client-side conversation turn.
#[derive(Debug, Deserialize)]
pub struct ClientMessage {
    /// "user" or "assistant".
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// Request to run one dispatch cycle.
#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    /// Conversation turns, oldest first. The trailing turn must be the new
    /// user message.
    pub messages: Vec<ClientMessage>,
}

/// Response for one dispatch cycle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponseBody {
    /// Final natural-language reply.
    pub message: String,
    /// Tool invocations the model requested, for audit/UI display.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub function_calls: Vec<ToolInvocation>,
    /// Structured tool results, aligned with the executed invocations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub function_results: Vec<serde_json::Value>,
}

/// Run one dispatch cycle for the conversation in the request body.
///
/// # Errors
///
/// Returns 400 for a malformed conversation and 502 when the dispatch cycle
/// fails (model call failure or malformed tool arguments).
#[instrument(skip(state, body))]
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ChatRequestBody>,
) -> Result<Json<ChatResponseBody>> {
    let (user_text, prior) = split_conversation(body.messages)?;

    let service = DispatchService::new(state.claude(), state.catalog());
    let outcome = service.dispatch(prior, &user_text).await?;

    Ok(Json(ChatResponseBody {
        message: outcome.reply,
        function_calls: outcome.invocations,
        function_results: outcome.outcomes,
    }))
}

/// Split the client conversation into prior turns and the new user message.
fn split_conversation(
    mut messages: Vec<ClientMessage>,
) -> Result<(String, Vec<Message>)> {
    let last = messages
        .pop()
        .ok_or_else(|| AppError::BadRequest("messages must not be empty".to_string()))?;
    if last.role != "user" {
        return Err(AppError::BadRequest(
            "the trailing message must be a user turn".to_string(),
        ));
    }

    let mut prior = Vec::with_capacity(messages.len());
    for msg in messages {
        match msg.role.as_str() {
            "user" => prior.push(Message::user(msg.content)),
            "assistant" => prior.push(Message::assistant(msg.content)),
            other => {
                return Err(AppError::BadRequest(format!(
                    "unsupported message role: {other}"
                )));
            }
        }
    }

    Ok((last.content, prior))
}
