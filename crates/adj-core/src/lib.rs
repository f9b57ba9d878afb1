//! # adj-core -- Foundational Types for the Adjudicator Client
//!
//! Defines the data model shared by every other crate in the workspace:
//! the [`Session`] aggregate and its [`Argument`], [`Appeal`], and
//! [`Judgement`] records, plus the identifier newtypes that address them.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `SessionId`, `RecordId`, and
//!    `ParticipantId` are distinct types. No bare strings for identifiers.
//!
//! 2. **Lenient wire decoding.** The backend emits integer ids and omits
//!    empty collections. Every optional field is `#[serde(default)]` and ids
//!    accept either integers or strings.
//!
//! 3. **No derived state is stored.** Phase flags live in `adj-state` and are
//!    computed from the primary data defined here.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `adj-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use domain::{
    AppealEligibility, Appeal, Argument, Judgement, ParticipantRef, Quorum, Session,
    DEFAULT_QUORUM,
};
pub use error::ValidationError;
pub use identity::{ParticipantId, RecordId, SessionId};
