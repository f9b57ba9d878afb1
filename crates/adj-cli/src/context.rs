//! Client construction shared by every subcommand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use adj_client::{AdjudicatorClient, ClientConfig, FileIdentityStore, IdentityProvider};
use anyhow::{Context, Result};
use url::Url;

/// Name of the identity file inside the state directory.
pub const IDENTITY_FILE: &str = "identity.json";

/// Options that apply to every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    /// Overrides `ADJUDICATOR_API_URL` when set.
    pub api_url: Option<String>,
    /// Directory holding the persisted identity.
    pub state_dir: PathBuf,
}

impl GlobalOpts {
    pub fn identity_path(&self) -> PathBuf {
        self.state_dir.join(IDENTITY_FILE)
    }
}

/// Build a client from the environment, applying command-line overrides.
pub fn build_client(opts: &GlobalOpts) -> Result<AdjudicatorClient> {
    let mut config = ClientConfig::from_env().context("invalid adjudicator configuration")?;
    if let Some(raw) = &opts.api_url {
        config.base_url =
            Url::parse(raw).with_context(|| format!("invalid --api-url: {raw:?}"))?;
    }
    tracing::debug!(base_url = %config.base_url, state_dir = %opts.state_dir.display(), "building client");

    let identity = identity_provider(&opts.identity_path());
    AdjudicatorClient::new(config, identity).context("failed to build HTTP client")
}

/// File-backed identity provider rooted at `path`.
pub fn identity_provider(path: &Path) -> IdentityProvider {
    IdentityProvider::new(Arc::new(FileIdentityStore::open(path)))
}
