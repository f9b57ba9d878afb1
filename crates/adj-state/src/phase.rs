//! # Session Phase
//!
//! Lifecycle phase of a session, derived purely from its primary data.

use adj_core::{Quorum, Session};
use serde::{Deserialize, Serialize};

/// The lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    /// Created, no participants or arguments yet.
    Created,
    /// Participants known or arguments submitted, below quorum.
    Open,
    /// Quorum reached, no judgement yet.
    AwaitingJudgement,
    /// Judgement returned, no appeal filed.
    Judged,
    /// At least one appeal filed, no appeal judgement yet.
    AppealPending,
    /// An appeal has been resolved with a judgement.
    AppealJudged,
}

impl SessionPhase {
    /// Compute the phase of `session` under `quorum`.
    ///
    /// Later lifecycle evidence wins: an appeal judgement outranks pending
    /// appeals, which outrank the original judgement, which outranks the
    /// argument count.
    pub fn derive(session: &Session, quorum: Quorum) -> Self {
        if session.appeal_judgement.is_some() {
            SessionPhase::AppealJudged
        } else if !session.appeals.is_empty() {
            SessionPhase::AppealPending
        } else if session.judgement.is_some() {
            SessionPhase::Judged
        } else if quorum.is_met_by(session.arguments.len()) {
            SessionPhase::AwaitingJudgement
        } else if !session.arguments.is_empty() || !session.participants.is_empty() {
            SessionPhase::Open
        } else {
            SessionPhase::Created
        }
    }

    /// Whether the session is waiting for a judgement request.
    pub fn is_awaiting_judgement(self) -> bool {
        self == SessionPhase::AwaitingJudgement
    }

    /// Whether a judgement (original or appeal) exists.
    pub fn is_judged(self) -> bool {
        matches!(
            self,
            SessionPhase::Judged | SessionPhase::AppealPending | SessionPhase::AppealJudged
        )
    }

    /// The canonical phase name.
    pub fn name(self) -> &'static str {
        match self {
            SessionPhase::Created => "CREATED",
            SessionPhase::Open => "OPEN",
            SessionPhase::AwaitingJudgement => "AWAITING_JUDGEMENT",
            SessionPhase::Judged => "JUDGED",
            SessionPhase::AppealPending => "APPEAL_PENDING",
            SessionPhase::AppealJudged => "APPEAL_JUDGED",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
