//! `pchain run` (single template) and `pchain chain` (multi-step chain).
//!
//! Both commands capture the execution context first, compose the document,
//! then either print it (`--dry-run`) or deliver it through the configured
//! gateway with recovery fallback.

use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use promptchain_core::builder::session::run_builder_session;
use promptchain_core::chain::definition::{find_chain, unresolved_templates};
use promptchain_core::chain::source::ChainDefinitionSource;
use promptchain_core::compose::{compose_chain, compose_single};
use promptchain_core::delivery::{AssistantGateway, DeliveryError, DeliveryOutcome, deliver};
use promptchain_core::template::TemplateStore;
use promptchain_types::builder::BuilderOutcome;
use promptchain_types::chain::ChainDefinition;
use promptchain_types::document::CompositeDocument;

use super::context::ContextArgs;
use super::presenter::{ChainMenuSelection, DialoguerPresenter, pick_chain};
use crate::state::AppState;

/// Output switches shared by the composing commands.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
    pub dry_run: bool,
}

/// Compose `template` with the active context and deliver it.
pub async fn run_single(state: &AppState, template: &str, context: &ContextArgs, mode: OutputMode) -> Result<()> {
    let ctx = context.capture().await?;

    let document = compose_single(&state.templates, template, &ctx)
        .await
        .with_context(|| format!("Failed to compose template '{template}'"))?;

    finish(state, document, mode).await
}

/// Resolve a chain (by name, menu, or builder), compose it, deliver it.
pub async fn run_chain(state: &AppState, name: Option<&str>, context: &ContextArgs, mode: OutputMode) -> Result<()> {
    let ctx = context.capture().await?;

    let Some(chain) = resolve_chain(state, name, mode).await? else {
        if !mode.quiet {
            eprintln!("  {} Cancelled.", style("i").blue().bold());
        }
        return Ok(());
    };

    let available = state
        .templates
        .list_templates()
        .await
        .context("Failed to list templates")?;
    let missing = unresolved_templates(&chain, &available);
    if !missing.is_empty() {
        bail!(
            "Chain '{}' references missing template{}: {}",
            chain.name,
            if missing.len() == 1 { "" } else { "s" },
            missing.join(", ")
        );
    }

    tracing::info!(chain = %chain, "composing chain");
    let document = compose_chain(&state.templates, &chain, &ctx)
        .await
        .with_context(|| format!("Failed to compose chain '{}'", chain.name))?;

    finish(state, document, mode).await
}

/// The chain to run, or `None` if the user cancelled.
async fn resolve_chain(state: &AppState, name: Option<&str>, mode: OutputMode) -> Result<Option<ChainDefinition>> {
    let listing = state.chains.list_chain_definitions().await;

    if let Some(name) = name {
        return match find_chain(&listing, name) {
            Some(chain) => Ok(Some(chain.clone())),
            None => {
                let known: Vec<&str> = listing.definitions.iter().map(|c| c.name.as_str()).collect();
                if known.is_empty() {
                    bail!("No saved chain named '{name}' (no saved chains in {})", state.chains.dir().display());
                }
                bail!("No saved chain named '{name}'. Available: {}", known.join(", "));
            }
        };
    }

    for diag in &listing.diagnostics {
        if !mode.quiet {
            eprintln!(
                "  {} skipped {}: {}",
                style("!").yellow().bold(),
                diag.path.display(),
                diag.reason
            );
        }
    }

    match pick_chain(&listing.definitions).await? {
        ChainMenuSelection::Saved(i) => Ok(listing.definitions.get(i).cloned()),
        ChainMenuSelection::Cancelled => Ok(None),
        ChainMenuSelection::BuildCustom => build_custom_chain(state).await,
    }
}

async fn build_custom_chain(state: &AppState) -> Result<Option<ChainDefinition>> {
    let catalog = state
        .templates
        .list_templates()
        .await
        .context("Failed to list templates")?;
    if catalog.is_empty() {
        bail!("No templates to build a chain from. Add *.md files to {}", state.templates.dir().display());
    }

    let mut presenter = DialoguerPresenter;
    let outcome = run_builder_session(&state.templates, &mut presenter, Uuid::now_v7())
        .await
        .context("Chain builder failed")?;

    Ok(match outcome {
        BuilderOutcome::Finalized(chain) => Some(chain),
        BuilderOutcome::Cancelled => None,
    })
}

/// Print or deliver a composed document, then report how it went.
async fn finish(state: &AppState, document: CompositeDocument, mode: OutputMode) -> Result<()> {
    if mode.dry_run {
        println!("{document}");
        return Ok(());
    }

    let gateway = state.gateway(mode.json);

    let spinner = (gateway.is_remote() && !mode.quiet).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(format!("Sending to {}...", gateway.name()));
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner
    });

    let text = mode.json.then(|| document.text.clone());
    let result = deliver(&gateway, &state.recovery, document).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(outcome) => {
            if let DeliveryOutcome::Recovered { error, receipt } = &outcome {
                eprintln!(
                    "  {} Dispatch failed: {error}",
                    style("⚠").yellow().bold()
                );
                eprintln!(
                    "  {} Document saved to {}",
                    style("⚠").yellow().bold(),
                    style(&receipt.location).yellow()
                );
            }
            match (&text, &outcome) {
                (Some(text), _) => println!("{}", serde_json::to_string_pretty(&delivery_report(&outcome, text))?),
                (None, DeliveryOutcome::Dispatched(receipt)) => {
                    if let Some(reply) = &receipt.reply {
                        println!("{reply}");
                    }
                }
                (None, DeliveryOutcome::Recovered { .. }) => {}
            }
            Ok(())
        }
        Err(DeliveryError::Unrecoverable { document, dispatch, recovery }) => {
            eprintln!(
                "  {} Dispatch failed ({dispatch}) and the document could not be saved ({recovery}). Printing it instead.",
                style("✗").red().bold()
            );
            println!("{document}");
            bail!("Document could not be delivered")
        }
    }
}

/// The `--json` report for a delivered document. It is the only thing
/// written to stdout in JSON mode, so it carries the document text too.
fn delivery_report(outcome: &DeliveryOutcome, document: &str) -> serde_json::Value {
    match outcome {
        DeliveryOutcome::Dispatched(receipt) => serde_json::json!({
            "status": "dispatched",
            "gateway": receipt.gateway,
            "document": document,
            "reply": receipt.reply,
        }),
        DeliveryOutcome::Recovered { error, receipt } => serde_json::json!({
            "status": "recovered",
            "error": error.to_string(),
            "location": receipt.location,
        }),
    }
}
