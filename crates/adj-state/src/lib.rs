//! # adj-state -- Session State Store
//!
//! Holds the single cached [`Session`](adj_core::Session) that the rest of
//! the client observes, and owns the lifecycle invariants around it.
//!
//! ## Lifecycle
//!
//! ```text
//! CREATED ─invite*─▶ OPEN ─submit_argument*─▶ OPEN
//!                     │
//!          submit_argument (reaches quorum)
//!                     ▼
//!            AWAITING_JUDGEMENT ─request_judgement─▶ JUDGED
//!                                                      │
//!                                               submit_appeal
//!                                                      ▼
//!            APPEAL_JUDGED ◀─appeal resolves─ APPEAL_PENDING
//! ```
//!
//! The phase is never stored. [`SessionPhase::derive`] recomputes it from
//! the argument list, judgement, and appeals every time it is asked for, so
//! it cannot drift from the data it summarizes.
//!
//! ## Update Discipline
//!
//! - **Replace**: create, fetch, and display-name responses are the full
//!   authoritative session and overwrite the cache wholesale.
//! - **Merge**: argument, judgement, and appeal responses are partial and
//!   are folded into the cached session only when a [`SessionGuard`] admits
//!   it. A rejected merge is reported as [`MergeOutcome::Stale`]; the store
//!   never returns an error.

pub mod guard;
pub mod phase;
pub mod store;

pub use guard::{MergeOutcome, SessionGuard};
pub use phase::SessionPhase;
pub use store::{SessionSnapshot, SessionStore};
