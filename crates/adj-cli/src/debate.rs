//! # Debate Subcommands
//!
//! - `argue` -- Submit an argument, optionally with an image.
//! - `judge` -- Request the automated judgement.
//! - `appeal` -- Appeal the judgement.
//!
//! Each invocation starts with an empty cache, so the session is fetched
//! first. Merged responses then land on the cached session and the printed
//! phase reflects them.

use std::path::PathBuf;

use adj_client::{AdjudicatorClient, ImageAttachment};
use adj_core::{AppealEligibility, SessionId};
use anyhow::{Context, Result};
use clap::Args;

use crate::output::print_response;

/// Arguments for `adj argue`.
#[derive(Args, Debug)]
pub struct ArgueArgs {
    /// Session identifier.
    pub session: SessionId,
    /// Argument text.
    #[arg(long)]
    pub content: String,
    /// Image file to attach as evidence.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Arguments for `adj judge`.
#[derive(Args, Debug)]
pub struct JudgeArgs {
    /// Session identifier.
    pub session: SessionId,
}

/// Arguments for `adj appeal`.
#[derive(Args, Debug)]
pub struct AppealArgs {
    /// Session identifier.
    pub session: SessionId,
    /// Grounds for the appeal.
    #[arg(long)]
    pub content: String,
}

pub async fn run_argue(client: &AdjudicatorClient, args: &ArgueArgs) -> Result<u8> {
    let image = match &args.image {
        Some(path) => Some(
            ImageAttachment::from_path(path)
                .await
                .with_context(|| format!("failed to read image {}", path.display()))?,
        ),
        None => None,
    };

    client.sessions().get_session(&args.session).await?;
    let argument = client
        .sessions()
        .submit_argument(&args.session, &args.content, image)
        .await?;
    print_response(client.store(), &argument)?;
    Ok(0)
}

pub async fn run_judge(client: &AdjudicatorClient, args: &JudgeArgs) -> Result<u8> {
    client.sessions().get_session(&args.session).await?;
    if !client.store().awaiting_judgement() {
        tracing::warn!(session_id = %args.session, "session is not awaiting judgement");
    }
    let judgement = client.sessions().request_judgement(&args.session).await?;
    print_response(client.store(), &judgement)?;
    Ok(0)
}

pub async fn run_appeal(client: &AdjudicatorClient, args: &AppealArgs) -> Result<u8> {
    let session = client.sessions().get_session(&args.session).await?;
    let me = client.identity().participant_id();
    match session.appeal_eligibility(&me) {
        AppealEligibility::Eligible => {}
        other => tracing::warn!(participant = %me, eligibility = ?other, "backend is likely to reject this appeal"),
    }
    let appeal = client
        .sessions()
        .submit_appeal(&args.session, &args.content)
        .await?;
    print_response(client.store(), &appeal)?;
    Ok(0)
}
