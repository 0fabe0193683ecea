/// Kind of reply a completed cycle rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    Text,
    Ticket,
    Error,
}

/// Lifecycle of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CyclePhase {
    #[default]
    Idle,
    AwaitingResponse,
    RenderingText,
    RenderingTicket,
    RenderingError,
}

/// State transition input for the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleTransition {
    Submit,
    Reply(ReplyKind),
    Settle,
    /// Forced return to idle when a cycle is abandoned mid-flight.
    Abort,
}

/// Rejection reason for illegal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRejection {
    AlreadyInFlight,
    NoPendingRequest { phase: CyclePhase },
    NothingToSettle { phase: CyclePhase },
}

pub type PhaseResult = Result<CyclePhase, PhaseRejection>;

impl CyclePhase {
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Applies one transition deterministically.
    ///
    /// `Idle -> AwaitingResponse -> Rendering* -> Idle` is the only accepted path,
    /// apart from `Abort` which is accepted from any phase.
    pub fn apply(self, transition: CycleTransition) -> PhaseResult {
        match transition {
            CycleTransition::Submit => self.apply_submit(),
            CycleTransition::Reply(kind) => self.apply_reply(kind),
            CycleTransition::Settle => self.apply_settle(),
            CycleTransition::Abort => Ok(Self::Idle),
        }
    }

    fn apply_submit(self) -> PhaseResult {
        match self {
            Self::Idle => Ok(Self::AwaitingResponse),
            Self::AwaitingResponse
            | Self::RenderingText
            | Self::RenderingTicket
            | Self::RenderingError => Err(PhaseRejection::AlreadyInFlight),
        }
    }

    fn apply_reply(self, kind: ReplyKind) -> PhaseResult {
        match self {
            Self::AwaitingResponse => Ok(match kind {
                ReplyKind::Text => Self::RenderingText,
                ReplyKind::Ticket => Self::RenderingTicket,
                ReplyKind::Error => Self::RenderingError,
            }),
            phase => Err(PhaseRejection::NoPendingRequest { phase }),
        }
    }

    fn apply_settle(self) -> PhaseResult {
        match self {
            Self::RenderingText | Self::RenderingTicket | Self::RenderingError => Ok(Self::Idle),
            phase => Err(PhaseRejection::NothingToSettle { phase }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_idle_for_every_reply_kind() {
        for (kind, rendering) in [
            (ReplyKind::Text, CyclePhase::RenderingText),
            (ReplyKind::Ticket, CyclePhase::RenderingTicket),
            (ReplyKind::Error, CyclePhase::RenderingError),
        ] {
            let awaiting = CyclePhase::Idle.apply(CycleTransition::Submit);
            assert_eq!(awaiting, Ok(CyclePhase::AwaitingResponse));

            let rendered = CyclePhase::AwaitingResponse.apply(CycleTransition::Reply(kind));
            assert_eq!(rendered, Ok(rendering));

            assert_eq!(rendering.apply(CycleTransition::Settle), Ok(CyclePhase::Idle));
        }
    }

    #[test]
    fn second_submit_is_rejected_while_awaiting() {
        assert_eq!(
            CyclePhase::AwaitingResponse.apply(CycleTransition::Submit),
            Err(PhaseRejection::AlreadyInFlight)
        );
    }

    #[test]
    fn reply_without_request_is_rejected() {
        assert_eq!(
            CyclePhase::Idle.apply(CycleTransition::Reply(ReplyKind::Text)),
            Err(PhaseRejection::NoPendingRequest {
                phase: CyclePhase::Idle
            })
        );
    }

    #[test]
    fn settle_requires_a_rendering_phase() {
        assert_eq!(
            CyclePhase::AwaitingResponse.apply(CycleTransition::Settle),
            Err(PhaseRejection::NothingToSettle {
                phase: CyclePhase::AwaitingResponse
            })
        );
    }

    #[test]
    fn abort_always_lands_in_idle() {
        assert_eq!(
            CyclePhase::AwaitingResponse.apply(CycleTransition::Abort),
            Ok(CyclePhase::Idle)
        );
        assert_eq!(CyclePhase::Idle.apply(CycleTransition::Abort), Ok(CyclePhase::Idle));
    }
}
