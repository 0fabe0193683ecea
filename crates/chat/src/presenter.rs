//! Read-only view models for turns and tickets.
//!
//! These hold no state beyond what they are built from; the gpui layer maps
//! them onto theme colors and icons.
use crate::turn::{Role, Ticket, Turn};

pub const ASSISTANT_SPEAKER: &str = "Nexo";
pub const USER_SPEAKER: &str = "You";
pub const BRAND_INITIAL: &str = "N";
pub const TIMESTAMP_FORMAT: &str = "%H:%M";

pub const TICKET_HEADER: &str = "Ticket Saved to Sheets";
pub const TICKET_ISSUE_LABEL: &str = "Issue";
pub const TICKET_PRIORITY_LABEL: &str = "Priority";
pub const TICKET_USER_LABEL: &str = "User";
pub const TICKET_STATUS: &str = "Synced";

/// Three-bucket display style for a free-form priority label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriorityStyle {
    Critical,
    Login,
    #[default]
    Normal,
}

impl PriorityStyle {
    /// Case-insensitive exact match on the two known labels; anything else is `Normal`.
    pub fn classify(priority: &str) -> Self {
        match priority.to_lowercase().as_str() {
            "critical" => Self::Critical,
            "login" => Self::Login,
            _ => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Avatar {
    /// Generic user glyph.
    User,
    /// Brand initial on a filled circle.
    Brand(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPresentation {
    pub header: &'static str,
    pub issue: String,
    pub priority: String,
    pub priority_style: PriorityStyle,
    pub submitter: String,
    pub reference: String,
    pub status: &'static str,
}

impl TicketPresentation {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            header: TICKET_HEADER,
            issue: ticket.issue.clone(),
            priority: ticket.priority.clone(),
            priority_style: PriorityStyle::classify(&ticket.priority),
            submitter: ticket.submitter.clone(),
            reference: format!("ID: #{}", ticket.ticket_id),
            status: TICKET_STATUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePresentation {
    pub alignment: Alignment,
    pub avatar: Avatar,
    pub speaker: &'static str,
    pub timestamp: String,
    pub ticket: Option<TicketPresentation>,
    /// One entry per `\n`-separated line. Empty when the turn has no text body.
    pub paragraphs: Vec<String>,
}

impl MessagePresentation {
    pub fn from_turn(turn: &Turn) -> Self {
        let (alignment, avatar, speaker) = match turn.role {
            Role::User => (Alignment::End, Avatar::User, USER_SPEAKER),
            Role::Assistant => (Alignment::Start, Avatar::Brand(BRAND_INITIAL), ASSISTANT_SPEAKER),
        };

        let paragraphs = turn
            .non_empty_text()
            .map(|text| text.split('\n').map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            alignment,
            avatar,
            speaker,
            timestamp: turn.created_at.format(TIMESTAMP_FORMAT).to_string(),
            ticket: turn.ticket.as_ref().map(TicketPresentation::from_ticket),
            paragraphs,
        }
    }

    pub fn is_user(&self) -> bool {
        self.alignment == Alignment::End
    }

    pub fn has_body(&self) -> bool {
        !self.paragraphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::turn::{TicketId, TurnId};

    #[test]
    fn priority_classification_is_case_insensitive_and_exact() {
        assert_eq!(PriorityStyle::classify("Critical"), PriorityStyle::Critical);
        assert_eq!(PriorityStyle::classify("CRITICAL"), PriorityStyle::Critical);
        assert_eq!(PriorityStyle::classify("Login"), PriorityStyle::Login);
        assert_eq!(PriorityStyle::classify("login"), PriorityStyle::Login);
        assert_eq!(PriorityStyle::classify("Normal"), PriorityStyle::Normal);
        assert_eq!(PriorityStyle::classify(""), PriorityStyle::Normal);
        assert_eq!(PriorityStyle::classify(" critical "), PriorityStyle::Normal);
        assert_eq!(PriorityStyle::classify("urgent"), PriorityStyle::Normal);
    }

    #[test]
    fn user_turn_is_end_aligned_with_split_paragraphs() {
        let mut turn = Turn::user(TurnId::new(2), "line one\nline two");
        turn.created_at = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 0)
            .single()
            .expect("valid local time");

        let presentation = MessagePresentation::from_turn(&turn);

        assert!(presentation.is_user());
        assert_eq!(presentation.avatar, Avatar::User);
        assert_eq!(presentation.speaker, "You");
        assert_eq!(presentation.timestamp, "07:05");
        assert_eq!(presentation.paragraphs, vec!["line one", "line two"]);
        assert!(presentation.ticket.is_none());
    }

    #[test]
    fn ticket_turn_has_card_and_no_body() {
        let ticket = Ticket::new(
            "Cannot log in",
            "Login",
            Some("Alice".into()),
            TicketId::new("AB12CD34E"),
        );
        let turn = Turn::assistant_ticket(TurnId::new(3), ticket);

        let presentation = MessagePresentation::from_turn(&turn);

        assert_eq!(presentation.alignment, Alignment::Start);
        assert_eq!(presentation.avatar, Avatar::Brand("N"));
        assert_eq!(presentation.speaker, "Nexo");
        assert!(!presentation.has_body());

        let card = presentation.ticket.expect("ticket card");
        assert_eq!(card.header, "Ticket Saved to Sheets");
        assert_eq!(card.issue, "Cannot log in");
        assert_eq!(card.priority_style, PriorityStyle::Login);
        assert_eq!(card.submitter, "Alice");
        assert_eq!(card.reference, "ID: #AB12CD34E");
        assert_eq!(card.status, "Synced");
    }

    #[test]
    fn empty_text_renders_no_paragraphs() {
        let turn = Turn::assistant_text(TurnId::new(4), "");

        assert!(!MessagePresentation::from_turn(&turn).has_body());
    }
}
