use std::ops::Range;

use nexo_llm::{
    CapabilityInvocation, ChatRequest, ErrorKind, GatewayError, GatewayResult, HistoryEntry,
    HistoryRole, LOG_TICKET_TOOL_NAME, ModelGateway, ModelReply,
};
use serde::Deserialize;
use snafu::{ResultExt, Snafu};

use crate::cycle::{CyclePhase, CycleTransition, ReplyKind};
use crate::turn::{Role, Ticket, TicketId, Turn, TurnId};

pub const GREETING: &str =
    "Hello! I'm Nexo, your premium AI support agent. How can I assist you today?";
pub const ERROR_PREFIX: &str = "Error: ";
pub const GENERIC_FAILURE_DETAIL: &str = "Something went wrong.";

/// Maps the internal speaker role to the remote model's vocabulary.
pub fn history_role(role: Role) -> HistoryRole {
    match role {
        Role::User => HistoryRole::User,
        Role::Assistant => HistoryRole::Model,
    }
}

/// Text of the assistant turn appended after a ticket card.
pub fn ticket_confirmation_text(ticket_id: &TicketId) -> String {
    format!("I've logged a ticket for this issue (ID: #{ticket_id}). Is there anything else?")
}

/// Text of the assistant turn appended when a cycle fails.
pub fn failure_text(detail: Option<&str>) -> String {
    let detail = detail
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .unwrap_or(GENERIC_FAILURE_DETAIL);
    format!("{ERROR_PREFIX}{detail}")
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CycleError {
    #[snafu(display("{source}"))]
    Gateway {
        stage: &'static str,
        source: GatewayError,
    },
    #[snafu(display("malformed {tool} arguments: {source}"))]
    TicketArguments {
        stage: &'static str,
        tool: &'static str,
        source: serde_json::Error,
    },
}

impl CycleError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Gateway { stage, .. } | Self::TicketArguments { stage, .. } => stage,
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Gateway { source, .. } => source.detail(),
            Self::TicketArguments { .. } => Some(self.to_string()),
        }
    }

    /// Gateway classification, `None` for failures raised after a reply arrived.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Gateway { source, .. } => Some(source.kind()),
            Self::TicketArguments { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TicketArguments {
    #[serde(default)]
    issue: String,
    #[serde(default)]
    priority: String,
    #[serde(default)]
    user_name: Option<String>,
}

#[derive(Debug)]
enum Rendered {
    Text(String),
    Ticket(Ticket),
}

impl Rendered {
    fn kind(&self) -> ReplyKind {
        match self {
            Self::Text(_) => ReplyKind::Text,
            Self::Ticket(_) => ReplyKind::Ticket,
        }
    }
}

/// Summary of one finished cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub kind: ReplyKind,
    /// Indices of the assistant turns appended by this cycle.
    pub appended: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Blank input or a request already in flight.
    Ignored,
    Completed(CycleReport),
}

/// Conversation state owned by a single writer.
///
/// Turns are append-only. Every mutation goes through [`begin_submit`](Self::begin_submit)
/// and [`complete`](Self::complete), which drive [`CyclePhase`].
#[derive(Debug, Clone)]
pub struct SessionState {
    turns: Vec<Turn>,
    pending_input: String,
    in_flight: bool,
    phase: CyclePhase,
    next_turn_id: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates a session seeded with the Nexo greeting.
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut session = Self::empty();
        let id = session.alloc_turn_id();
        session.turns.push(Turn::assistant_text(id, greeting));
        session
    }

    pub fn empty() -> Self {
        Self {
            turns: Vec::new(),
            pending_input: String::new(),
            in_flight: false,
            phase: CyclePhase::Idle,
            next_turn_id: 1,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.pending_input.trim().is_empty()
    }

    /// Role-tagged history of every turn with text.
    ///
    /// Leading assistant turns (the greeting) are dropped because the remote
    /// model requires history to open with a user turn.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.turns
            .iter()
            .filter_map(|turn| {
                turn.non_empty_text()
                    .map(|text| HistoryEntry::new(history_role(turn.role), text))
            })
            .skip_while(|entry| entry.role == HistoryRole::Model)
            .collect()
    }

    /// Starts a cycle: appends the user turn, clears input and marks the session in flight.
    ///
    /// Returns `None` without touching state when input is blank or a request is
    /// already outstanding.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            tracing::debug!(
                in_flight = self.in_flight,
                input_len = self.pending_input.len(),
                "ignoring submit"
            );
            return None;
        }

        let next_phase = match self.phase.apply(CycleTransition::Submit) {
            Ok(phase) => phase,
            Err(rejection) => {
                tracing::warn!(?rejection, "submit rejected by cycle phase");
                return None;
            }
        };

        // History is captured before the new turn so the message is not sent twice.
        let history = self.history();
        let message = std::mem::take(&mut self.pending_input);
        let id = self.alloc_turn_id();
        self.turns.push(Turn::user(id, message.clone()));
        self.in_flight = true;
        self.phase = next_phase;

        tracing::debug!(
            turn_count = self.turns.len(),
            history_len = history.len(),
            "submission started"
        );
        Some(ChatRequest::new(history, message))
    }

    /// Finishes the outstanding cycle with the gateway outcome.
    ///
    /// Appends one or two assistant turns on success, exactly one error turn on
    /// failure, and always leaves the session idle. Returns `None` when nothing
    /// was in flight.
    pub fn complete(&mut self, outcome: GatewayResult<ModelReply>) -> Option<CycleReport> {
        if !self.in_flight {
            tracing::warn!("received a gateway outcome with no request in flight");
            return None;
        }

        let first_appended = self.turns.len();
        let rendered = outcome
            .context(GatewaySnafu {
                stage: "gateway-reply",
            })
            .and_then(interpret_reply);
        let kind = match &rendered {
            Ok(rendered) => rendered.kind(),
            Err(_) => ReplyKind::Error,
        };
        self.advance(CycleTransition::Reply(kind));

        match rendered {
            Ok(Rendered::Text(text)) => {
                let id = self.alloc_turn_id();
                self.turns.push(Turn::assistant_text(id, text));
            }
            Ok(Rendered::Ticket(ticket)) => {
                let confirmation = ticket_confirmation_text(&ticket.ticket_id);
                tracing::info!(ticket_id = %ticket.ticket_id, priority = %ticket.priority, "ticket logged");

                let ticket_turn_id = self.alloc_turn_id();
                self.turns.push(Turn::assistant_ticket(ticket_turn_id, ticket));
                let confirmation_id = self.alloc_turn_id();
                self.turns
                    .push(Turn::assistant_text(confirmation_id, confirmation));
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    kind = ?error.kind(),
                    stage = error.stage(),
                    "conversation cycle failed"
                );
                let id = self.alloc_turn_id();
                self.turns
                    .push(Turn::assistant_text(id, failure_text(error.detail().as_deref())));
            }
        }

        self.advance(CycleTransition::Settle);
        self.in_flight = false;

        Some(CycleReport {
            kind,
            appended: first_appended..self.turns.len(),
        })
    }

    /// Drops an outstanding cycle without appending a reply.
    pub fn abort_cycle(&mut self) {
        if self.in_flight {
            tracing::warn!("abandoning in-flight request");
        }
        self.in_flight = false;
        self.advance(CycleTransition::Abort);
    }

    /// Runs one complete cycle against `gateway`.
    ///
    /// If this future is dropped before the gateway answers, the cycle still
    /// settles with one generic error turn.
    pub async fn submit(&mut self, gateway: &dyn ModelGateway) -> SubmitStatus {
        let Some(request) = self.begin_submit() else {
            return SubmitStatus::Ignored;
        };

        let guard = InFlightGuard { session: self };
        let outcome = gateway.send_message(request).await;

        match guard.session.complete(outcome) {
            Some(report) => SubmitStatus::Completed(report),
            None => SubmitStatus::Ignored,
        }
    }

    fn advance(&mut self, transition: CycleTransition) {
        match self.phase.apply(transition) {
            Ok(phase) => self.phase = phase,
            Err(rejection) => {
                tracing::error!(?rejection, ?transition, "illegal cycle transition, resetting to idle");
                self.phase = CyclePhase::Idle;
            }
        }
    }

    fn alloc_turn_id(&mut self) -> TurnId {
        let id = TurnId::new(self.next_turn_id);
        self.next_turn_id = self.next_turn_id.saturating_add(1);
        id
    }
}

struct InFlightGuard<'a> {
    session: &'a mut SessionState,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.session.in_flight {
            self.session.complete(Err(GatewayError::Transport {
                stage: "submit-dropped",
                detail: String::new(),
            }));
        }
    }
}

fn interpret_reply(reply: ModelReply) -> Result<Rendered, CycleError> {
    match reply.first_invocation() {
        Some(invocation) if invocation.name == LOG_TICKET_TOOL_NAME => {
            ticket_from_invocation(invocation).map(Rendered::Ticket)
        }
        Some(invocation) => {
            tracing::warn!(name = %invocation.name, "ignoring unrecognized capability invocation");
            Ok(Rendered::Text(reply.text.clone()))
        }
        None => Ok(Rendered::Text(reply.text.clone())),
    }
}

fn ticket_from_invocation(invocation: &CapabilityInvocation) -> Result<Ticket, CycleError> {
    let arguments =
        TicketArguments::deserialize(&invocation.arguments).context(TicketArgumentsSnafu {
            stage: "parse-ticket-arguments",
            tool: LOG_TICKET_TOOL_NAME,
        })?;

    Ok(Ticket::new(
        arguments.issue,
        arguments.priority,
        arguments.user_name,
        TicketId::generate(),
    ))
}
