//! # Merge Guard
//!
//! Merge responses describe one session. The cache may hold a different
//! session by the time a response arrives (the user navigated, or a newer
//! fetch replaced it). [`SessionGuard`] states which session a merge is
//! addressed to; the store applies the merge only when the guard admits the
//! cached value.

use adj_core::{Session, SessionId};

/// Identity check for a merge update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGuard {
    expected: SessionId,
}

impl SessionGuard {
    /// Guard a merge addressed to `expected`.
    pub fn new(expected: SessionId) -> Self {
        Self { expected }
    }

    /// The session the merge is addressed to.
    pub fn expected(&self) -> &SessionId {
        &self.expected
    }

    /// Admit the merge iff a session is cached and its id matches.
    pub fn admits(&self, cached: Option<&Session>) -> bool {
        cached.is_some_and(|s| s.id == self.expected)
    }
}

/// Result of offering a merge to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merge was folded into the cached session.
    Applied,
    /// The merge was dropped: the cache was empty or held another session.
    Stale {
        /// Id of the session cached at the time, if any.
        cached: Option<SessionId>,
    },
}

impl MergeOutcome {
    /// Whether the merge mutated the cache.
    pub fn is_applied(&self) -> bool {
        matches!(self, MergeOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_matching_session() {
        let session = Session::new(SessionId::from(1), "s", None);
        assert!(SessionGuard::new(SessionId::from(1)).admits(Some(&session)));
    }

    #[test]
    fn rejects_other_session() {
        let session = Session::new(SessionId::from(1), "s", None);
        assert!(!SessionGuard::new(SessionId::from(2)).admits(Some(&session)));
    }

    #[test]
    fn rejects_empty_cache() {
        assert!(!SessionGuard::new(SessionId::from(1)).admits(None));
    }
}
