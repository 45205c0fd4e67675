//! The two-phase tool dispatch loop.
//!
//! One user turn runs through at most two model round-trips:
//!
//! 1. The conversation plus the tool schema goes to the model. If the
//!    response carries no tool invocations, its text IS the final reply.
//! 2. Otherwise every invocation is executed in the order the model issued
//!    it, the structured results are appended to the conversation as tool
//!    result blocks, and the model is called again WITHOUT the tool schema.
//!    The second response's text is the final reply.
//!
//! The rounds are strictly ordered and nothing here mutates any cart: a
//! successful `add_to_cart` outcome is an intent the caller may apply.

use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::Catalog;

use super::client::ChatModel;
use super::error::AssistantError;
use super::tools::{ToolExecutor, storefront_tools};
use super::types::{ContentBlock, Message, MessageContent};

/// System prompt for the shopping assistant.
pub const SYSTEM_PROMPT: &str = include_str!("system_prompt.txt");

/// One tool invocation as requested by the model, kept for audit/UI display.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInvocation {
    /// Opaque call identifier issued by the model.
    pub id: String,
    /// Requested function name.
    pub name: String,
    /// Raw argument payload.
    pub input: serde_json::Value,
}

/// Result of one complete dispatch cycle.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Final natural-language reply.
    pub reply: String,
    /// Every tool invocation the model requested, in issued order.
    pub invocations: Vec<ToolInvocation>,
    /// Structured result payload per executed invocation, in the same order.
    /// Unknown tool names produce no entry.
    pub outcomes: Vec<serde_json::Value>,
}

/// Runs dispatch cycles against a catalog and a model.
pub struct DispatchService<'a, M> {
    model: &'a M,
    catalog: &'a Catalog,
    system_prompt: &'a str,
}

impl<'a, M: ChatModel> DispatchService<'a, M> {
    /// Create a dispatch service with the standard shopping-assistant
    /// system prompt.
    #[must_use]
    pub const fn new(model: &'a M, catalog: &'a Catalog) -> Self {
        Self {
            model,
            catalog,
            system_prompt: SYSTEM_PROMPT,
        }
    }

    /// Override the system prompt.
    #[must_use]
    pub const fn with_system_prompt(mut self, system_prompt: &'a str) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    /// Run one user turn through the two-phase protocol.
    ///
    /// `conversation` is the prior turns (oldest first); `user_text` is the
    /// new user message, appended before the first round.
    ///
    /// # Errors
    ///
    /// Fails if a model round-trip fails, the model returns an empty
    /// message, or a tool invocation carries arguments that do not match the
    /// declared schema. Domain-level misses (no search results, unresolvable
    /// cart items) are not errors; they are narrated back through the second
    /// round.
    #[instrument(skip_all)]
    pub async fn dispatch(
        &self,
        mut conversation: Vec<Message>,
        user_text: &str,
    ) -> Result<DispatchOutcome, AssistantError> {
        conversation.push(Message::user(user_text));

        let first = self
            .model
            .complete(
                conversation.clone(),
                Some(self.system_prompt.to_string()),
                Some(storefront_tools()),
            )
            .await?;

        let invocations: Vec<ToolInvocation> = first
            .tool_uses()
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolInvocation {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                }),
                _ => None,
            })
            .collect();

        // No tool use: the first response is the final reply.
        if invocations.is_empty() {
            let reply = first.text();
            if reply.trim().is_empty() {
                return Err(AssistantError::EmptyResponse);
            }
            return Ok(DispatchOutcome {
                reply,
                invocations,
                outcomes: Vec::new(),
            });
        }

        info!(count = invocations.len(), "executing tool invocations");

        let executor = ToolExecutor::new(self.catalog);
        let mut outcomes = Vec::new();
        let mut tool_results = Vec::new();

        for invocation in &invocations {
            let Some(payload) = executor.execute(&invocation.name, &invocation.input)? else {
                continue;
            };
            tool_results.push(ContentBlock::ToolResult {
                tool_use_id: invocation.id.clone(),
                content: payload.to_string(),
                is_error: None,
            });
            outcomes.push(payload);
        }

        // Replay the assistant turn verbatim, then attach the results in the
        // order the model issued the calls (the second round is
        // order-sensitive).
        conversation.push(Message {
            role: "assistant".to_string(),
            content: MessageContent::Blocks(first.content.clone()),
        });
        if !tool_results.is_empty() {
            conversation.push(Message {
                role: "user".to_string(),
                content: MessageContent::Blocks(tool_results),
            });
        }

        // Second round carries no tool schema: it can only produce text.
        let second = self
            .model
            .complete(conversation, Some(self.system_prompt.to_string()), None)
            .await?;

        let reply = second.text();
        if reply.trim().is_empty() {
            return Err(AssistantError::EmptyResponse);
        }

        Ok(DispatchOutcome {
            reply,
            invocations,
            outcomes,
        })
    }
}
