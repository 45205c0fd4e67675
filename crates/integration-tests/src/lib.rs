//! Integration tests for KitchenCraft.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kitchencraft-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `search_engine` - Search ranking and filtering over the bundled catalog
//! - `assistant_dispatch` - End-to-end dispatch cycles against a scripted model
//! - `cart_round_trip` - Applying confirmed cart intents to the cart state machine
//!
//! The suite never talks to the network: the model seam is a scripted fake
//! and the catalog is the JSON file the storefront ships with.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Mutex;

use kitchencraft_storefront::assistant::{
    AssistantError, ChatModel, ChatResponse, ContentBlock, Message, StopReason, Tool, Usage,
};
use kitchencraft_storefront::catalog::Catalog;

/// Load the catalog the storefront ships with.
///
/// # Panics
///
/// Panics if the bundled catalog file is missing or invalid; the suite
/// cannot run without it.
#[must_use]
pub fn bundled_catalog() -> Catalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../storefront/data/products.json");
    Catalog::load(&path).expect("bundled catalog should load")
}

/// A scripted language model: pops one canned response per round-trip and
/// records every call for assertions.
pub struct ScriptedModel {
    responses: Mutex<Vec<ChatResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// One recorded model round-trip.
#[derive(Clone)]
pub struct RecordedCall {
    pub messages: Vec<Message>,
    pub system: Option<String>,
    pub tools: Option<Vec<Tool>>,
}

impl ScriptedModel {
    /// Create a model that will answer with `responses`, in order.
    #[must_use]
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of round-trips made so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("lock").len()
    }

    /// The recorded call at `index`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `index + 1` calls were made.
    #[must_use]
    pub fn call(&self, index: usize) -> RecordedCall {
        self.calls
            .lock()
            .expect("lock")
            .get(index)
            .expect("recorded call")
            .clone()
    }
}

impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        tools: Option<Vec<Tool>>,
    ) -> Result<ChatResponse, AssistantError> {
        self.calls.lock().expect("lock").push(RecordedCall {
            messages,
            system,
            tools,
        });
        let mut responses = self.responses.lock().expect("lock");
        if responses.is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(responses.remove(0))
    }
}

/// A plain-text model response.
#[must_use]
pub fn text_response(text: &str) -> ChatResponse {
    ChatResponse {
        id: "msg_text".to_string(),
        model: "scripted".to_string(),
        stop_reason: Some(StopReason::EndTurn),
        content: vec![ContentBlock::Text {
            text: text.to_string(),
        }],
        usage: Usage::default(),
    }
}

/// A model response requesting the given tool invocations.
#[must_use]
pub fn tool_response(calls: Vec<(&str, &str, serde_json::Value)>) -> ChatResponse {
    ChatResponse {
        id: "msg_tools".to_string(),
        model: "scripted".to_string(),
        stop_reason: Some(StopReason::ToolUse),
        content: calls
            .into_iter()
            .map(|(id, name, input)| ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            })
            .collect(),
        usage: Usage::default(),
    }
}
