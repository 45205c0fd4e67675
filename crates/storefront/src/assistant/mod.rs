//! AI shopping assistant built on the Claude Messages API.
//!
//! # Architecture
//!
//! - [`client`] - Non-streaming Claude API client and the [`ChatModel`] seam
//! - [`types`] - Messages API wire types (messages, content blocks, tools)
//! - [`tools`] - The two declared operations and their executor
//! - [`dispatch`] - The two-phase tool dispatch loop
//! - [`error`] - Error taxonomy for the dispatch cycle
//!
//! One user turn is one dispatch cycle: first model round with the tool
//! schema, tool execution against the catalog, second model round without
//! the schema, final reply plus the structured side-channel data the UI uses
//! to mutate the client-held cart.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod tools;
pub mod types;

pub use client::{ChatModel, ClaudeClient};
pub use dispatch::{DispatchOutcome, DispatchService, SYSTEM_PROMPT, ToolInvocation};
pub use error::AssistantError;
pub use tools::{ToolExecutor, storefront_tools};
pub use types::{ChatResponse, ContentBlock, Message, MessageContent, StopReason, Tool, Usage};
