use std::fmt;

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Submitter recorded when the model does not name one.
pub const UNKNOWN_SUBMITTER: &str = "Unknown";

const TICKET_ID_LEN: usize = 9;

/// Stable identifier for one turn. Ordering follows creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl TurnId {
    /// Creates a typed turn identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Locally issued ticket reference.
///
/// Not persisted and not guaranteed unique across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Issues a fresh nine-character upper-case token.
    pub fn generate() -> Self {
        let token = Uuid::new_v4().simple().to_string();
        Self(token[..TICKET_ID_LEN].to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Chat speaker role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

/// Support ticket captured from a `logTicket` call. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub issue: String,
    pub priority: String,
    pub submitter: String,
    pub ticket_id: TicketId,
}

impl Ticket {
    /// Builds a ticket, substituting [`UNKNOWN_SUBMITTER`] for an absent or blank name.
    pub fn new(
        issue: impl Into<String>,
        priority: impl Into<String>,
        submitter: Option<String>,
        ticket_id: TicketId,
    ) -> Self {
        let submitter = submitter
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SUBMITTER.to_string());

        Self {
            issue: issue.into(),
            priority: priority.into(),
            submitter,
            ticket_id,
        }
    }
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub text: Option<String>,
    pub created_at: DateTime<Local>,
    pub ticket: Option<Ticket>,
}

impl Turn {
    pub fn user(id: TurnId, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            text: Some(text.into()),
            created_at: Local::now(),
            ticket: None,
        }
    }

    pub fn assistant_text(id: TurnId, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Assistant,
            text: Some(text.into()),
            created_at: Local::now(),
            ticket: None,
        }
    }

    /// Assistant turn carrying only a ticket card.
    pub fn assistant_ticket(id: TurnId, ticket: Ticket) -> Self {
        Self {
            id,
            role: Role::Assistant,
            text: None,
            created_at: Local::now(),
            ticket: Some(ticket),
        }
    }

    /// Text body, or `None` when absent or empty.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ticket_ids_are_nine_upper_case_alphanumerics() {
        let id = TicketId::generate();

        assert_eq!(id.as_str().len(), 9);
        assert!(
            id.as_str()
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase())
        );
    }

    #[test]
    fn absent_or_blank_submitter_becomes_unknown() {
        let missing = Ticket::new("Printer jam", "Normal", None, TicketId::new("A1"));
        let blank = Ticket::new("Printer jam", "Normal", Some("  ".into()), TicketId::new("A2"));
        let named = Ticket::new("Printer jam", "Normal", Some("Bob".into()), TicketId::new("A3"));

        assert_eq!(missing.submitter, "Unknown");
        assert_eq!(blank.submitter, "Unknown");
        assert_eq!(named.submitter, "Bob");
    }

    #[test]
    fn ticket_turns_have_no_text_body() {
        let ticket = Ticket::new("Cannot log in", "Login", None, TicketId::new("XYZ"));
        let turn = Turn::assistant_ticket(TurnId::new(3), ticket);

        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.non_empty_text(), None);
        assert!(turn.ticket.is_some());
    }

    #[test]
    fn turn_ids_sort_by_creation_order() {
        let mut ids = vec![TurnId::new(3), TurnId::new(1), TurnId::new(2)];
        ids.sort();

        assert_eq!(ids, vec![TurnId::new(1), TurnId::new(2), TurnId::new(3)]);
    }
}
