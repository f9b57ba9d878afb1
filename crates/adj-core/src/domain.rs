//! # Session Domain Model
//!
//! The [`Session`] aggregate as the adjudication backend returns it, and
//! the records it owns.
//!
//! Fields use `#[serde(default)]` for resilience against schema evolution:
//! the backend omits empty collections and absent verdicts, and may return
//! additional fields not modeled here. `deny_unknown_fields` is not used.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{ParticipantId, RecordId, SessionId};

/// Argument count at which a session starts awaiting judgement.
pub const DEFAULT_QUORUM: usize = 2;

// -- Quorum -------------------------------------------------------------------

/// Minimum number of arguments before a session awaits judgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Quorum(usize);

impl Quorum {
    /// Create a quorum. Zero is rejected: a session with no arguments can
    /// never be judged.
    pub fn new(count: usize) -> Result<Self, ValidationError> {
        if count == 0 {
            return Err(ValidationError::InvalidQuorum(count));
        }
        Ok(Self(count))
    }

    /// The required argument count.
    pub fn get(self) -> usize {
        self.0
    }

    /// Whether `count` arguments satisfy this quorum.
    pub fn is_met_by(self, count: usize) -> bool {
        count >= self.0
    }
}

impl Default for Quorum {
    fn default() -> Self {
        Self(DEFAULT_QUORUM)
    }
}

impl TryFrom<usize> for Quorum {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quorum> for usize {
    fn from(q: Quorum) -> Self {
        q.0
    }
}

// -- Records ------------------------------------------------------------------

/// A participant reference: identity plus optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    #[serde(alias = "userId", alias = "user_id")]
    pub id: ParticipantId,
    #[serde(default, alias = "username", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single argument submitted to a session.
///
/// Ordering is carried by position in [`Session::arguments`], not by a
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Author identity, when the backend echoes it.
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ParticipantId>,
    /// Author display name, when the backend echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub content: String,
    /// Reference to the uploaded image evidence, if any.
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Argument {
    /// The author as a participant reference, if the backend identified one.
    pub fn author(&self) -> Option<ParticipantRef> {
        self.user_id.as_ref().map(|id| ParticipantRef {
            id: id.clone(),
            name: self.username.clone(),
        })
    }
}

/// Verdict payload from the adjudication service.
///
/// The client stores and forwards judgements atomically. Only `loser` is
/// ever read, and only by [`Session::appeal_eligibility`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_argument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub losing_argument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Fields the backend sends that are not modeled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An appeal against a session's judgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appeal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub content: String,
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ParticipantId>,
    /// Resulting judgement, when the backend resolves the appeal inline.
    #[serde(
        default,
        alias = "appeal_judgement",
        alias = "appealJudgement",
        skip_serializing_if = "Option::is_none"
    )]
    pub judgement: Option<Judgement>,
}

// -- Session ------------------------------------------------------------------

/// Whether a participant may appeal the current judgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealEligibility {
    /// The participant lost and may appeal.
    Eligible,
    /// There is no judgement to appeal yet.
    NoJudgement,
    /// Only the losing party may appeal.
    NotLosingParty,
}

/// A single adjudicated debate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub participants: Vec<ParticipantRef>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    #[serde(default)]
    pub judgement: Option<Judgement>,
    #[serde(default)]
    pub appeals: Vec<Appeal>,
    #[serde(default, alias = "appealJudgement")]
    pub appeal_judgement: Option<Judgement>,
}

impl Session {
    /// Create an empty session value. Used by tests and local fixtures;
    /// real sessions come from the server.
    pub fn new(id: SessionId, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            participants: Vec::new(),
            arguments: Vec::new(),
            judgement: None,
            appeals: Vec::new(),
            appeal_judgement: None,
        }
    }

    /// Number of submitted arguments.
    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// Whether enough arguments exist for the backend to accept a
    /// judgement request.
    pub fn ready_for_judgement(&self, quorum: Quorum) -> bool {
        quorum.is_met_by(self.arguments.len())
    }

    /// Whether `participant` was invited or has argued in this session.
    pub fn has_participant(&self, participant: &ParticipantId) -> bool {
        self.participants.iter().any(|p| &p.id == participant)
            || self
                .arguments
                .iter()
                .any(|a| a.user_id.as_ref() == Some(participant))
    }

    /// Record `participant` unless already present. Participants only grow.
    pub fn add_participant(&mut self, participant: ParticipantRef) {
        if !self.participants.iter().any(|p| p.id == participant.id) {
            self.participants.push(participant);
        }
    }

    /// Advisory check mirroring the backend's appeal rule: only the losing
    /// party of an existing judgement may appeal.
    pub fn appeal_eligibility(&self, participant: &ParticipantId) -> AppealEligibility {
        match &self.judgement {
            None => AppealEligibility::NoJudgement,
            Some(j) if j.loser.as_deref() == Some(participant.as_str()) => {
                AppealEligibility::Eligible
            }
            Some(_) => AppealEligibility::NotLosingParty,
        }
    }
}
