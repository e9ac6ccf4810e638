//! CLI command definitions for the `pchain` binary.
//!
//! Uses clap derive macros for argument parsing. Commands that compose a
//! document (`run`, `chain`) share the context-source flags in
//! [`context::ContextArgs`].

pub mod check;
pub mod context;
pub mod list;
pub mod presenter;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use context::ContextArgs;

/// Compose prompt templates into chained assistant requests.
#[derive(Parser)]
#[command(name = "pchain", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans with the OpenTelemetry stdout exporter.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Workspace root (overrides PROMPTCHAIN_WORKSPACE and discovery).
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List templates or saved chains.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Compose a single template with the active context and dispatch it.
    Run {
        /// Template identifier (file name without `.md`).
        template: String,

        #[command(flatten)]
        context: ContextArgs,

        /// Print the composed document instead of dispatching it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Compose a chain of templates and dispatch it.
    ///
    /// Without --name, an interactive menu offers the saved chains and a
    /// builder for a custom one.
    Chain {
        /// Run this saved chain without prompting.
        #[arg(long, short)]
        name: Option<String>,

        #[command(flatten)]
        context: ContextArgs,

        /// Print the composed document instead of dispatching it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate saved chains against the template directory.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// Templates in the templates directory.
    Templates,
    /// Saved chain definitions, plus files that failed to load.
    Chains,
}
