//! promptchain CLI entry point.
//!
//! Binary name: `pchain`
//!
//! Parses CLI arguments, sets up tracing, resolves the workspace, then
//! dispatches to the command handler.

mod cli;
mod state;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;

use cli::run::OutputMode;
use cli::{Cli, Commands, ListResource};
use promptchain_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Shell completions don't need a workspace
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pchain", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let state = AppState::init(cli.workspace.as_deref()).await?;

    match cli.command {
        Commands::List { resource } => match resource {
            ListResource::Templates => cli::list::list_templates(&state, cli.json).await?,
            ListResource::Chains => cli::list::list_chains(&state, cli.json).await?,
        },

        Commands::Run {
            template,
            context,
            dry_run,
        } => {
            let mode = OutputMode {
                json: cli.json,
                quiet: cli.quiet,
                dry_run,
            };
            cli::run::run_single(&state, &template, &context, mode).await?;
        }

        Commands::Chain {
            name,
            context,
            dry_run,
        } => {
            let mode = OutputMode {
                json: cli.json,
                quiet: cli.quiet,
                dry_run,
            };
            cli::run::run_chain(&state, name.as_deref(), &context, mode).await?;
        }

        Commands::Check => {
            if !cli::check::check_chains(&state, cli.json).await? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Completions { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
