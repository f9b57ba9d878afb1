//! # Session Subcommands
//!
//! - `create` -- Open a new debate session.
//! - `show` -- Fetch a session and report its phase.
//! - `invite` -- Invite a participant by email.
//! - `rename` -- Change the local participant's display name in a session.
//! - `whoami` -- Print the local participant identity.

use adj_client::AdjudicatorClient;
use adj_core::SessionId;
use anyhow::Result;
use clap::Args;

use crate::output::print_response;

/// Arguments for `adj create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Session title.
    #[arg(long)]
    pub name: String,
    /// The question under debate.
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Arguments for `adj show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Session identifier.
    pub session: SessionId,
}

/// Arguments for `adj invite`.
#[derive(Args, Debug)]
pub struct InviteArgs {
    /// Session identifier.
    pub session: SessionId,
    /// Email address of the invitee.
    #[arg(long)]
    pub email: String,
}

/// Arguments for `adj rename`.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Session identifier.
    pub session: SessionId,
    /// New display name.
    #[arg(long)]
    pub name: String,
}

pub async fn run_create(client: &AdjudicatorClient, args: &CreateArgs) -> Result<u8> {
    let session = client
        .sessions()
        .create_session(&args.name, &args.description)
        .await?;
    print_response(client.store(), &session)?;
    Ok(0)
}

pub async fn run_show(client: &AdjudicatorClient, args: &ShowArgs) -> Result<u8> {
    let session = client.sessions().get_session(&args.session).await?;
    print_response(client.store(), &session)?;
    Ok(0)
}

pub async fn run_invite(client: &AdjudicatorClient, args: &InviteArgs) -> Result<u8> {
    let result = client
        .sessions()
        .invite_participant(&args.session, &args.email)
        .await?;
    print_response(client.store(), &result)?;
    Ok(0)
}

pub async fn run_rename(client: &AdjudicatorClient, args: &RenameArgs) -> Result<u8> {
    let me = client.identity().participant_id();
    let session = client
        .sessions()
        .update_display_name(&args.session, &me, &args.name)
        .await?;
    print_response(client.store(), &session)?;
    Ok(0)
}

/// Print the local participant id and display name. Creates the id on
/// first use.
pub fn run_whoami(client: &AdjudicatorClient) -> Result<u8> {
    let identity = client.identity();
    let whoami = serde_json::json!({
        "userId": identity.participant_id(),
        "username": identity.display_name(),
    });
    print_response(client.store(), &whoami)?;
    Ok(0)
}
