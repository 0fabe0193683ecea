use std::future::Future;
use std::pin::Pin;

use snafu::Snafu;

/// Role vocabulary expected by the remote model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryRole {
    User,
    Model,
}

impl HistoryRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One prior turn sent as context. Text is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub text: String,
}

impl HistoryEntry {
    pub fn new(role: HistoryRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Prior history plus the message being sent now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub history: Vec<HistoryEntry>,
    pub message: String,
}

impl ChatRequest {
    pub fn new(history: Vec<HistoryEntry>, message: impl Into<String>) -> Self {
        Self {
            history,
            message: message.into(),
        }
    }
}

/// A structured function call emitted by the model instead of text.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityInvocation {
    pub name: String,
    pub arguments: serde_json::Value,
}

impl CapabilityInvocation {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Raw model response as seen by the conversation layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelReply {
    pub invocations: Vec<CapabilityInvocation>,
    pub text: String,
}

impl ModelReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            invocations: Vec::new(),
            text: text.into(),
        }
    }

    pub fn invocation(invocation: CapabilityInvocation) -> Self {
        Self {
            invocations: vec![invocation],
            text: String::new(),
        }
    }

    /// The first declared invocation, if the model made any.
    pub fn first_invocation(&self) -> Option<&CapabilityInvocation> {
        self.invocations.first()
    }
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Coarse classification used when surfacing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GatewayError {
    #[snafu(display(
        "Gemini API key is not configured. Please set {env_var} in your environment."
    ))]
    MissingApiKey {
        stage: &'static str,
        env_var: &'static str,
    },
    #[snafu(display("http client failed on `{stage}`, {source}"))]
    HttpClient {
        stage: &'static str,
        source: rig::http_client::Error,
    },
    #[snafu(display("completions failed on `{stage}`, {source}"))]
    CompletionsFailed {
        stage: &'static str,
        source: rig::completion::CompletionError,
    },
    #[snafu(display("{detail}"))]
    Transport {
        stage: &'static str,
        detail: String,
    },
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey { .. } => ErrorKind::Configuration,
            Self::HttpClient { .. } | Self::CompletionsFailed { .. } | Self::Transport { .. } => {
                ErrorKind::Transport
            }
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::MissingApiKey { stage, .. }
            | Self::HttpClient { stage, .. }
            | Self::CompletionsFailed { stage, .. }
            | Self::Transport { stage, .. } => stage,
        }
    }

    /// Best user-facing detail for this failure, `None` when nothing useful is known.
    ///
    /// Configuration errors are shown as-is; transport errors drop the stage prefix
    /// so the remote message reaches the user unchanged.
    pub fn detail(&self) -> Option<String> {
        let detail = match self {
            Self::MissingApiKey { .. } => self.to_string(),
            Self::HttpClient { source, .. } => source.to_string(),
            Self::CompletionsFailed { source, .. } => source.to_string(),
            Self::Transport { detail, .. } => detail.clone(),
        };

        let detail = detail.trim();
        if detail.is_empty() {
            None
        } else {
            Some(detail.to_string())
        }
    }
}

/// Boundary to the remote language model.
///
/// Implementations build a fresh session per call with the `logTicket` tool declared,
/// send `request.message` against `request.history`, and never retry.
pub trait ModelGateway: Send + Sync {
    fn name(&self) -> &str;
    fn send_message<'a>(&'a self, request: ChatRequest) -> BoxFuture<'a, GatewayResult<ModelReply>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_roles_use_remote_vocabulary() {
        assert_eq!(HistoryRole::User.as_str(), "user");
        assert_eq!(HistoryRole::Model.as_str(), "model");
    }

    #[test]
    fn transport_detail_is_passed_through_verbatim() {
        let error = GatewayError::Transport {
            stage: "send-message",
            detail: "quota exceeded".to_string(),
        };

        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.stage(), "send-message");
        assert_eq!(error.detail().as_deref(), Some("quota exceeded"));
        assert_eq!(error.to_string(), "quota exceeded");
    }

    #[test]
    fn blank_transport_detail_reports_none() {
        let error = GatewayError::Transport {
            stage: "send-message",
            detail: "   ".to_string(),
        };

        assert_eq!(error.detail(), None);
    }

    #[test]
    fn missing_api_key_is_a_configuration_error_shown_as_is() {
        let error = GatewayError::MissingApiKey {
            stage: "gemini-send-message",
            env_var: "GEMINI_API_KEY",
        };

        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert_eq!(
            error.detail().as_deref(),
            Some("Gemini API key is not configured. Please set GEMINI_API_KEY in your environment.")
        );
    }

    #[test]
    fn first_invocation_prefers_earliest_call() {
        let reply = ModelReply {
            invocations: vec![
                CapabilityInvocation::new("logTicket", serde_json::json!({ "issue": "a" })),
                CapabilityInvocation::new("other", serde_json::json!({})),
            ],
            text: String::new(),
        };

        assert_eq!(
            reply.first_invocation().map(|call| call.name.as_str()),
            Some("logTicket")
        );
        assert!(ModelReply::text("hi").first_invocation().is_none());
    }
}
