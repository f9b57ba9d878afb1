//! # adj CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use adj_cli::context::{build_client, GlobalOpts};
use adj_cli::debate::{run_appeal, run_argue, run_judge, AppealArgs, ArgueArgs, JudgeArgs};
use adj_cli::session::{
    run_create, run_invite, run_rename, run_show, run_whoami, CreateArgs, InviteArgs, RenameArgs,
    ShowArgs,
};

/// Debate adjudication client.
///
/// Creates debate sessions, submits arguments, requests the automated
/// verdict, and files appeals against it.
#[derive(Parser, Debug)]
#[command(name = "adj", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend base URL. Overrides ADJUDICATOR_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for the persisted participant identity.
    #[arg(long, global = true, env = "ADJUDICATOR_STATE_DIR", default_value = ".adjudicator")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new debate session.
    Create(CreateArgs),
    /// Fetch a session and show its phase.
    Show(ShowArgs),
    /// Invite a participant by email.
    Invite(InviteArgs),
    /// Submit an argument, optionally with image evidence.
    Argue(ArgueArgs),
    /// Request the automated judgement.
    Judge(JudgeArgs),
    /// Appeal the judgement of a session.
    Appeal(AppealArgs),
    /// Change your display name in a session.
    Rename(RenameArgs),
    /// Show the local participant identity.
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = GlobalOpts {
        api_url: cli.api_url,
        state_dir: cli.state_dir,
    };

    let result = match build_client(&opts) {
        Ok(client) => match &cli.command {
            Commands::Create(args) => run_create(&client, args).await,
            Commands::Show(args) => run_show(&client, args).await,
            Commands::Invite(args) => run_invite(&client, args).await,
            Commands::Argue(args) => run_argue(&client, args).await,
            Commands::Judge(args) => run_judge(&client, args).await,
            Commands::Appeal(args) => run_appeal(&client, args).await,
            Commands::Rename(args) => run_rename(&client, args).await,
            Commands::Whoami => run_whoami(&client),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
