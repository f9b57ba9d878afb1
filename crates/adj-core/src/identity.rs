//! # Identity Newtypes
//!
//! Identifier newtypes for sessions, server-side records, and participants.
//! Each identifier is a distinct type: you cannot pass a [`RecordId`]
//! where a [`SessionId`] is expected.
//!
//! ## Wire Format
//!
//! The backend assigns integer primary keys, but the client treats every
//! server identifier as opaque. [`SessionId`] and [`RecordId`] deserialize
//! from either a JSON number or a JSON string and are held as strings.
//!
//! [`ParticipantId`] is generated locally: the prefix `user_` followed by
//! nine random base-36 characters.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Prefix for locally generated participant identifiers.
pub const PARTICIPANT_ID_PREFIX: &str = "user_";

/// Number of random base-36 characters after the prefix.
pub const PARTICIPANT_TOKEN_LEN: usize = 9;

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Raw server identifier: integer primary key or opaque string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Int(n) => n.to_string(),
            RawId::Str(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Server-assigned identifiers
// ---------------------------------------------------------------------------

/// Opaque identifier of a session, assigned by the server at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session identifier, rejecting blank values and the
    /// relative path components `.` and `..`.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptySessionId);
        }
        if id == "." || id == ".." {
            return Err(ValidationError::ReservedSessionId(id));
        }
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawId::deserialize(deserializer)?.into_string();
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Opaque identifier of a server-side record (argument, appeal, judgement).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RecordId(String);

impl RecordId {
    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(RawId::deserialize(deserializer)?.into_string()))
    }
}

// ---------------------------------------------------------------------------
// Locally generated identifiers
// ---------------------------------------------------------------------------

/// Pseudo-identity distinguishing clients without formal authentication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wrap an existing identifier, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyParticipantId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier: `user_` plus nine base-36 characters.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let token: String = (0..PARTICIPANT_TOKEN_LEN)
            .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
            .collect();
        Self(format!("{PARTICIPANT_ID_PREFIX}{token}"))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
