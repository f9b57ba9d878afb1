//! Rendering of responses for the terminal.

use adj_state::SessionStore;
use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print `value` as JSON, followed by the cached session's phase.
pub fn print_response<T: Serialize>(store: &SessionStore, value: &T) -> Result<()> {
    println!("{}", render(store, value)?);
    Ok(())
}

pub(crate) fn render<T: Serialize>(store: &SessionStore, value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("failed to encode response")?;
    if let Some(phase) = store.phase() {
        out.push_str(&format!("\nphase: {phase}"));
        if store.awaiting_judgement() {
            out.push_str(" (ready for judgement)");
        }
    }
    Ok(out)
}
