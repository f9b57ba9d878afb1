//! # adj-cli -- Command-line driver for the adjudication service
//!
//! A thin wrapper over [`adj_client`]. Each invocation builds a client,
//! performs one call, and prints the response as JSON followed by the
//! derived phase of the cached session.
//!
//! ## Subcommands
//!
//! - `create`, `show`, `invite`, `rename`, `whoami`: session and identity
//!   management ([`session`])
//! - `argue`, `judge`, `appeal`: the debate itself ([`debate`])
//!
//! The participant identity persists in `<state-dir>/identity.json` so
//! repeated invocations act as the same participant.

pub mod context;
pub mod debate;
pub mod output;
pub mod session;
