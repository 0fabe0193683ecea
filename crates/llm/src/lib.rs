//! Model gateway for the Nexo support assistant.
//!
//! Wraps rig's Gemini provider behind [`ModelGateway`] so the conversation layer
//! only deals with role-tagged history, a message, and a [`ModelReply`].
use std::sync::Arc;

mod config;
mod gateway;
mod rig_adapter;
mod tool;

pub use config::{
    ConfigError, DEFAULT_GEMINI_MODEL, DEFAULT_MAX_OUTPUT_TOKENS, GEMINI_API_KEY_ENV,
    GatewayConfig, GatewaySettings,
};
pub use gateway::{
    BoxFuture, CapabilityInvocation, ChatRequest, ErrorKind, GatewayError, GatewayResult,
    HistoryEntry, HistoryRole, ModelGateway, ModelReply,
};
pub use rig_adapter::{GEMINI_GATEWAY_NAME, GeminiGateway};
pub use tool::{
    LOG_TICKET_ISSUE_ARG, LOG_TICKET_PRIORITY_ARG, LOG_TICKET_TOOL_NAME,
    LOG_TICKET_USER_NAME_ARG, log_ticket_tool,
};

pub fn create_gateway(config: GatewayConfig) -> Arc<dyn ModelGateway> {
    Arc::new(GeminiGateway::new(config))
}
