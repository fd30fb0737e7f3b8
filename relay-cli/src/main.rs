//! Relay CLI - interactive chat front-end for workflow engines.
//!
//! Ships with a replay engine that feeds recorded workflow events through
//! the front-end; real graph engines plug in through the same trait.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

mod chat;
mod config;
mod error;
mod replay;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use relay::session::WorkflowSession;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::RelayConfig;
use crate::error::Result;
use crate::replay::ReplayEngine;

/// Relay - chat front-end for multi-agent workflow engines
#[derive(Parser)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "RELAY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat(ChatArgs),

    /// Print the compiled workflow's graph diagram
    Diagram(ChatArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments shared by commands that build a workflow.
#[derive(Args)]
struct ChatArgs {
    /// Recorded events file to replay (overrides config)
    #[arg(short, long, env = "RELAY_EVENTS")]
    events: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "relay_cli={level},relay={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let config = load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Chat(args) => cmd_chat(args, config).await,
        Commands::Diagram(args) => cmd_diagram(args, config).await,
        Commands::Config(args) => cmd_config(args, config),
    }
}

/// Load configuration from the explicit path or the default location.
async fn load(path: Option<&std::path::Path>) -> Result<RelayConfig> {
    let config = match path {
        Some(path) => config::load_config_from(path).await?,
        None => config::load_config().await?,
    };
    Ok(config)
}

/// Build a session from the configured or overridden events file.
///
/// Without an events file the session stays unbuilt; turns then report the
/// not-built sentinel instead of failing.
async fn build_session(events: Option<PathBuf>, config: &RelayConfig) -> Result<WorkflowSession> {
    let mut session = WorkflowSession::new();

    let events_file = events.or_else(|| config.replay.events_file.clone());
    if let Some(path) = events_file {
        let engine = ReplayEngine::new(path);
        session.build(&engine, &config.graph).await?;
    }

    Ok(session)
}

/// Start the interactive chat loop.
async fn cmd_chat(args: ChatArgs, config: RelayConfig) -> Result<()> {
    let session = build_session(args.events, &config).await?;
    chat::run(&session).await
}

/// Print the workflow's graph diagram.
async fn cmd_diagram(args: ChatArgs, config: RelayConfig) -> Result<()> {
    let session = build_session(args.events, &config).await?;
    match session.diagram() {
        Some(diagram) => println!("{diagram}"),
        None => println!("No diagram available."),
    }
    Ok(())
}

/// Handle config subcommands.
fn cmd_config(args: ConfigArgs, config: RelayConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(crate::config::ConfigError::TomlSerialize)?;
            println!("{rendered}");
        }
        ConfigCommands::Path => {
            println!("{}", config::config_path().display());
        }
    }
    Ok(())
}
