//! # adj-client -- Typed Rust client for the adjudication service
//!
//! Provides typed access to the session API of a debate/adjudication
//! backend: create and fetch sessions, invite participants, submit
//! arguments with optional image evidence, request judgements, and appeal.
//!
//! ## Architecture
//!
//! - [`SessionClient`] issues the REST calls and is the only writer of the
//!   shared [`SessionStore`]: full-session responses replace the cache,
//!   partial responses are merged into it under an identity guard.
//! - [`IdentityProvider`] supplies the local participant id and display
//!   name. Whether they are attached to requests is configuration
//!   ([`IdentityMode`]), not a separate client.
//! - Consumers observe the store through
//!   [`SessionStore::subscribe`](adj_state::SessionStore::subscribe) and
//!   only ever see immutable snapshots.
//!
//! Calls are not retried. A failed call is logged and returned, and leaves
//! both the store and the local identity untouched.

pub mod attachment;
pub mod config;
pub mod error;
pub mod identity;
pub mod sessions;
pub(crate) mod transport;

pub use attachment::ImageAttachment;
pub use config::{ClientConfig, ConfigError, IdentityMode};
pub use error::ApiError;
pub use identity::{FileIdentityStore, IdentityProvider, IdentityStore, MemoryIdentityStore};
pub use sessions::SessionClient;

pub use adj_state::{MergeOutcome, SessionPhase, SessionSnapshot, SessionStore};

/// Top-level adjudicator client. Owns the session store and the identity
/// provider shared with the session sub-client.
#[derive(Debug, Clone)]
pub struct AdjudicatorClient {
    sessions: SessionClient,
    store: SessionStore,
    identity: IdentityProvider,
}

impl AdjudicatorClient {
    /// Create a client from configuration and an identity provider.
    pub fn new(config: ClientConfig, identity: IdentityProvider) -> Result<Self, ApiError> {
        let transport = transport::Transport::new(&config)?;
        let store = SessionStore::new(config.quorum);
        let sessions =
            SessionClient::new(transport, identity.clone(), store.clone(), config.identity);

        tracing::debug!(base_url = %config.base_url, identity = ?config.identity, "adjudicator client ready");

        Ok(Self {
            sessions,
            store,
            identity,
        })
    }

    /// Access the session API client.
    pub fn sessions(&self) -> &SessionClient {
        &self.sessions
    }

    /// Access the session state store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Access the local identity provider.
    pub fn identity(&self) -> &IdentityProvider {
        &self.identity
    }
}
