use rig::completion::{CompletionModel, Message as RigMessage};
use rig::message::AssistantContent;
use rig::prelude::CompletionClient;
use rig::providers::gemini;
use snafu::{OptionExt, ResultExt};

use super::config::{GEMINI_API_KEY_ENV, GatewayConfig};
use super::gateway::{
    BoxFuture, CapabilityInvocation, ChatRequest, CompletionsFailedSnafu, GatewayResult,
    HistoryEntry, HistoryRole, HttpClientSnafu, MissingApiKeySnafu, ModelGateway, ModelReply,
};
use super::tool::log_ticket_tool;

pub const GEMINI_GATEWAY_NAME: &str = "Gemini";

/// Gateway backed by rig's Gemini provider.
///
/// A client and completion model are built per call so every session carries the
/// current tool declaration and token cap.
pub struct GeminiGateway {
    config: GatewayConfig,
}

impl GeminiGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn build_client(config: &GatewayConfig) -> GatewayResult<gemini::Client> {
        let api_key = config.api_key.as_deref().context(MissingApiKeySnafu {
            stage: "gemini-build-client",
            env_var: GEMINI_API_KEY_ENV,
        })?;

        let mut builder = gemini::Client::builder().api_key(api_key);
        if let Some(base_url) = config.settings.base_url.as_deref() {
            builder = builder.base_url(base_url);
        }
        builder.build().context(HttpClientSnafu {
            stage: "gemini-build-client",
        })
    }

    fn to_rig_message(entry: &HistoryEntry) -> RigMessage {
        match entry.role {
            HistoryRole::User => RigMessage::user(entry.text.clone()),
            HistoryRole::Model => RigMessage::assistant(entry.text.clone()),
        }
    }

    async fn exchange(config: &GatewayConfig, request: ChatRequest) -> GatewayResult<ModelReply> {
        let client = Self::build_client(config)?;
        let model = client.completion_model(config.settings.model_id.clone());

        let history = request
            .history
            .iter()
            .map(Self::to_rig_message)
            .collect::<Vec<_>>();

        tracing::debug!(
            model_id = %config.settings.model_id,
            history_len = history.len(),
            max_output_tokens = config.settings.max_output_tokens,
            "sending message to gemini"
        );

        let completion_request = model
            .completion_request(RigMessage::user(request.message))
            .messages(history)
            .tools(vec![log_ticket_tool()])
            .max_tokens(config.settings.max_output_tokens)
            .build();

        let response = model
            .completion(completion_request)
            .await
            .context(CompletionsFailedSnafu {
                stage: "gemini-send-message",
            })?;

        let reply = reply_from_contents(response.choice.iter());
        tracing::debug!(
            invocation_count = reply.invocations.len(),
            text_len = reply.text.len(),
            "gemini reply received"
        );
        Ok(reply)
    }
}

impl ModelGateway for GeminiGateway {
    fn name(&self) -> &str {
        GEMINI_GATEWAY_NAME
    }

    fn send_message<'a>(&'a self, request: ChatRequest) -> BoxFuture<'a, GatewayResult<ModelReply>> {
        Box::pin(async move {
            let result = Self::exchange(&self.config, request).await;
            if let Err(error) = &result {
                tracing::warn!(
                    model_id = %self.config.settings.model_id,
                    stage = error.stage(),
                    error = %error,
                    "gemini request failed"
                );
            }
            result
        })
    }
}

/// Folds rig's assistant content into text plus function calls.
///
/// Text parts are concatenated in order; reasoning and media parts are ignored.
pub(crate) fn reply_from_contents<'a>(
    contents: impl IntoIterator<Item = &'a AssistantContent>,
) -> ModelReply {
    let mut reply = ModelReply::default();

    for content in contents {
        match content {
            AssistantContent::Text(text) => reply.text.push_str(&text.text),
            AssistantContent::ToolCall(call) => {
                reply.invocations.push(CapabilityInvocation::new(
                    call.function.name.clone(),
                    call.function.arguments.clone(),
                ));
            }
            _ => {}
        }
    }

    reply
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::GatewaySettings;
    use crate::gateway::{ErrorKind, GatewayError};

    #[test]
    fn text_parts_are_concatenated() {
        let contents = [AssistantContent::text("Hello, "), AssistantContent::text("Alice.")];

        let reply = reply_from_contents(contents.iter());

        assert!(reply.invocations.is_empty());
        assert_eq!(reply.text, "Hello, Alice.");
    }

    #[test]
    fn tool_calls_become_invocations() {
        let contents = [AssistantContent::tool_call(
            "call-1",
            "logTicket",
            json!({ "issue": "Cannot log in", "priority": "Critical" }),
        )];

        let reply = reply_from_contents(contents.iter());

        assert_eq!(reply.invocations.len(), 1);
        assert_eq!(reply.invocations[0].name, "logTicket");
        assert_eq!(reply.invocations[0].arguments["issue"], "Cannot log in");
        assert!(reply.text.is_empty());
    }

    #[test]
    fn history_roles_map_to_rig_messages() {
        let user = GeminiGateway::to_rig_message(&HistoryEntry::new(HistoryRole::User, "hi"));
        let model = GeminiGateway::to_rig_message(&HistoryEntry::new(HistoryRole::Model, "hello"));

        assert!(matches!(user, RigMessage::User { .. }));
        assert!(matches!(model, RigMessage::Assistant { .. }));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_network_call() {
        let gateway = GeminiGateway::new(GatewayConfig::new(None, GatewaySettings::default()));

        let error = gateway
            .send_message(ChatRequest::new(Vec::new(), "hello"))
            .await
            .expect_err("no key configured");

        assert!(matches!(error, GatewayError::MissingApiKey { .. }));
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert_eq!(gateway.name(), "Gemini");
    }
}
