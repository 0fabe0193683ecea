//! Conversation state and view models for Nexo.
//!
//! Nothing here touches gpui, so a whole submit cycle can run against a
//! scripted [`nexo_llm::ModelGateway`] in plain tests.
pub mod cycle;
pub mod navigation;
pub mod presenter;
pub mod session;
pub mod turn;

pub use cycle::{CyclePhase, CycleTransition, PhaseRejection, PhaseResult, ReplyKind};
pub use navigation::{NavigationAction, NavigationPanel};
pub use presenter::{
    Alignment, Avatar, MessagePresentation, PriorityStyle, TicketPresentation,
};
pub use session::{
    CycleError, CycleReport, GREETING, SessionState, SubmitStatus, failure_text, history_role,
    ticket_confirmation_text,
};
pub use turn::{Role, Ticket, TicketId, Turn, TurnId, UNKNOWN_SUBMITTER};
