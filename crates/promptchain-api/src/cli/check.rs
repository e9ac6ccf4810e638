//! `pchain check`: validate saved chains against the template directory.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use promptchain_core::chain::definition::unresolved_templates;
use promptchain_core::chain::source::ChainDefinitionSource;
use promptchain_core::template::TemplateStore;
use promptchain_types::chain::{ChainListing, ChainOrigin};

use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChainCheck {
    Ok { name: String, file: String },
    Unresolved { name: String, file: String, missing: Vec<String> },
    Malformed { file: String, reason: String },
}

impl ChainCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Check every listed chain against `templates`.
pub fn check_listing(listing: &ChainListing, templates: &[String]) -> Vec<ChainCheck> {
    let mut checks: Vec<ChainCheck> = listing
        .definitions
        .iter()
        .map(|chain| {
            let file = match &chain.origin {
                ChainOrigin::Saved { path } => path.display().to_string(),
                ChainOrigin::Built { .. } => String::new(),
            };
            let missing = unresolved_templates(chain, templates);
            if missing.is_empty() {
                ChainCheck::Ok {
                    name: chain.name.clone(),
                    file,
                }
            } else {
                ChainCheck::Unresolved {
                    name: chain.name.clone(),
                    file,
                    missing,
                }
            }
        })
        .collect();

    checks.extend(listing.diagnostics.iter().map(|d| ChainCheck::Malformed {
        file: d.path.display().to_string(),
        reason: d.reason.clone(),
    }));
    checks
}

/// Run the check and report. Returns whether every chain is healthy.
pub async fn check_chains(state: &AppState, json: bool) -> Result<bool> {
    let templates = state
        .templates
        .list_templates()
        .await
        .context("Failed to list templates")?;
    let listing = state.chains.list_chain_definitions().await;
    let checks = check_listing(&listing, &templates);
    let healthy = checks.iter().all(ChainCheck::is_ok);

    if json {
        let report = serde_json::json!({
            "templates": templates.len(),
            "chains": checks,
            "healthy": healthy,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(healthy);
    }

    println!();
    println!(
        "  {} Checking chains in {}",
        style("*").cyan().bold(),
        style(state.chains.dir().display()).dim()
    );
    println!();
    for check in &checks {
        match check {
            ChainCheck::Ok { name, .. } => {
                println!("  {} {}", style("✓").green(), name);
            }
            ChainCheck::Unresolved { name, missing, .. } => {
                println!(
                    "  {} {} (missing: {})",
                    style("✗").red(),
                    name,
                    style(missing.join(", ")).yellow()
                );
            }
            ChainCheck::Malformed { file, reason } => {
                println!("  {} {}: {}", style("✗").red(), style(file).yellow(), reason);
            }
        }
    }
    if checks.is_empty() {
        println!("  {} No saved chains.", style("i").blue().bold());
    }
    println!();

    Ok(healthy)
}
