//! # Local Participant Identity
//!
//! Resolves a stable pseudo-random participant identifier for this client
//! and a mutable display name, persisted through an [`IdentityStore`].
//!
//! There are no error conditions at this layer. A backend that fails to
//! persist logs a warning and keeps serving the value from memory, so the
//! identity stays stable for the lifetime of the process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use adj_core::ParticipantId;
use parking_lot::Mutex;

/// Storage key for the participant identifier.
pub const PARTICIPANT_ID_KEY: &str = "userId";

/// Storage key for the display name.
pub const DISPLAY_NAME_KEY: &str = "username";

/// Display name used when none has been set.
pub const ANONYMOUS: &str = "Anonymous";

/// Key/value backend for persisted identity fields.
pub trait IdentityStore: Send + Sync + std::fmt::Debug {
    /// Read a stored value.
    fn load(&self, key: &str) -> Option<String>;
    /// Persist a value.
    fn store(&self, key: &str, value: &str);
}

/// In-process store. Values are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }
}

/// JSON-file store. The whole map is rewritten on every `store`.
#[derive(Debug)]
pub struct FileIdentityStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileIdentityStore {
    /// Open (or lazily create) the identity file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring unreadable identity file: {e}");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read identity file: {e}");
                BTreeMap::new()
            }
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, json)
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&values) {
            tracing::warn!(path = %self.path.display(), key, "failed to persist identity: {e}");
        }
    }
}

/// Resolves the local participant identity.
#[derive(Debug, Clone)]
pub struct IdentityProvider {
    store: Arc<dyn IdentityStore>,
    create_lock: Arc<Mutex<()>>,
}

impl IdentityProvider {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self {
            store,
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Provider backed by a fresh [`MemoryIdentityStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryIdentityStore::new()))
    }

    /// The stable participant identifier, created and persisted on first use.
    pub fn participant_id(&self) -> ParticipantId {
        let _guard = self.create_lock.lock();
        if let Some(id) = self
            .store
            .load(PARTICIPANT_ID_KEY)
            .and_then(|raw| ParticipantId::new(raw).ok())
        {
            return id;
        }
        let id = ParticipantId::generate();
        tracing::debug!(participant_id = %id, "created participant identity");
        self.store.store(PARTICIPANT_ID_KEY, id.as_str());
        id
    }

    /// The persisted display name, or `"Anonymous"`.
    pub fn display_name(&self) -> String {
        self.store
            .load(DISPLAY_NAME_KEY)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }

    /// Persist a new display name for future calls.
    pub fn set_display_name(&self, name: &str) {
        self.store.store(DISPLAY_NAME_KEY, name);
    }
}
