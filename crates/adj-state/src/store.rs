//! # Session Store
//!
//! Observable single-slot cache for "the current session".
//!
//! Backed by a [`tokio::sync::watch`] channel. Every accepted change
//! publishes a new immutable [`SessionSnapshot`]; subscribers are woken once
//! per change. Merges run inside `send_if_modified`, so each one reads and
//! writes the slot atomically and concurrent merges are applied in the order
//! their responses arrive. Rejected merges neither mutate nor notify.

use std::sync::Arc;

use adj_core::{Appeal, Argument, Judgement, Quorum, Session, SessionId};
use tokio::sync::watch;

use crate::guard::{MergeOutcome, SessionGuard};
use crate::phase::SessionPhase;

/// Immutable view of the cached session handed to consumers.
pub type SessionSnapshot = Arc<Session>;

/// The single-session state store.
///
/// Cheaply cloneable via `Arc`; all clones share the same slot.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<SessionSnapshot>>>,
    quorum: Quorum,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Quorum::default())
    }
}

impl SessionStore {
    /// Create an empty store using `quorum` for phase derivation.
    pub fn new(quorum: Quorum) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            quorum,
        }
    }

    /// The quorum used for phase derivation.
    pub fn quorum(&self) -> Quorum {
        self.quorum
    }

    /// The latest snapshot, if a session is cached.
    pub fn current(&self) -> Option<SessionSnapshot> {
        self.tx.borrow().clone()
    }

    /// Subscribe to changes. The current value is marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionSnapshot>> {
        self.tx.subscribe()
    }

    /// Derived phase of the cached session.
    pub fn phase(&self) -> Option<SessionPhase> {
        self.tx
            .borrow()
            .as_deref()
            .map(|s| SessionPhase::derive(s, self.quorum))
    }

    /// Whether the cached session has reached quorum without a judgement.
    pub fn awaiting_judgement(&self) -> bool {
        self.phase().is_some_and(SessionPhase::is_awaiting_judgement)
    }

    /// Overwrite the cache with an authoritative full session.
    pub fn replace(&self, session: Session) {
        tracing::debug!(session_id = %session.id, "replacing cached session");
        self.tx.send_replace(Some(Arc::new(session)));
    }

    /// Drop the cached session.
    pub fn clear(&self) {
        self.tx.send_if_modified(|slot| slot.take().is_some());
    }

    /// Append an argument; its author joins the participant list.
    pub fn merge_argument(&self, session_id: &SessionId, argument: Argument) -> MergeOutcome {
        self.merge(SessionGuard::new(session_id.clone()), "argument", move |s| {
            if let Some(author) = argument.author() {
                s.add_participant(author);
            }
            s.arguments.push(argument);
        })
    }

    /// Set the session's judgement. Last write wins.
    pub fn merge_judgement(&self, session_id: &SessionId, judgement: Judgement) -> MergeOutcome {
        self.merge(SessionGuard::new(session_id.clone()), "judgement", move |s| {
            s.judgement = Some(judgement);
        })
    }

    /// Append an appeal. An embedded judgement becomes the session's appeal
    /// judgement in the same update.
    pub fn merge_appeal(&self, session_id: &SessionId, appeal: Appeal) -> MergeOutcome {
        self.merge(SessionGuard::new(session_id.clone()), "appeal", move |s| {
            if let Some(judgement) = &appeal.judgement {
                s.appeal_judgement = Some(judgement.clone());
            }
            s.appeals.push(appeal);
        })
    }

    fn merge(
        &self,
        guard: SessionGuard,
        kind: &'static str,
        apply: impl FnOnce(&mut Session),
    ) -> MergeOutcome {
        let mut outcome = MergeOutcome::Applied;
        self.tx.send_if_modified(|slot| {
            if !guard.admits(slot.as_deref()) {
                outcome = MergeOutcome::Stale {
                    cached: slot.as_ref().map(|s| s.id.clone()),
                };
                return false;
            }
            if let Some(current) = slot.as_mut() {
                apply(Arc::make_mut(current));
            }
            true
        });

        match &outcome {
            MergeOutcome::Applied => {
                tracing::debug!(session_id = %guard.expected(), kind, "merged update");
            }
            MergeOutcome::Stale { cached } => {
                tracing::debug!(
                    session_id = %guard.expected(),
                    cached = ?cached,
                    kind,
                    "dropping stale merge"
                );
            }
        }
        outcome
    }
}
