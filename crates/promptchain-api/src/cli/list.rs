//! `pchain list templates|chains`.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde::Serialize;

use promptchain_core::chain::source::ChainDefinitionSource;
use promptchain_core::template::TemplateStore;
use promptchain_types::chain::{ChainDefinition, ChainOrigin};
use promptchain_types::template::human_label;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct TemplateRow {
    id: String,
    label: String,
}

/// List every template identifier with its display label.
pub async fn list_templates(state: &AppState, json: bool) -> Result<()> {
    let ids = state
        .templates
        .list_templates()
        .await
        .context("Failed to list templates")?;

    if json {
        let rows: Vec<TemplateRow> = ids
            .iter()
            .map(|id| TemplateRow {
                id: id.clone(),
                label: human_label(id),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if ids.is_empty() {
        println!();
        println!(
            "  {} No templates found. Add *.md files to {}",
            style("i").blue().bold(),
            style(state.templates.dir().display()).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Template").fg(Color::White),
        Cell::new("Label").fg(Color::White),
    ]);
    for id in &ids {
        table.add_row(vec![Cell::new(id).fg(Color::Cyan), Cell::new(human_label(id))]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} template{} in {}",
        style(ids.len()).bold(),
        if ids.len() == 1 { "" } else { "s" },
        style(state.templates.dir().display()).dim()
    );
    println!();
    Ok(())
}

fn origin_file(chain: &ChainDefinition) -> String {
    match &chain.origin {
        ChainOrigin::Saved { path } => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        ChainOrigin::Built { .. } => "-".to_string(),
    }
}

/// List saved chains, then any files that were skipped.
pub async fn list_chains(state: &AppState, json: bool) -> Result<()> {
    let listing = state.chains.list_chain_definitions().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.definitions.is_empty() && listing.diagnostics.is_empty() {
        println!();
        println!(
            "  {} No saved chains. Add *.chain.json or *.chain.yaml files to {}",
            style("i").blue().bold(),
            style(state.chains.dir().display()).yellow()
        );
        println!();
        return Ok(());
    }

    if !listing.definitions.is_empty() {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Name").fg(Color::White),
            Cell::new("Steps").fg(Color::White),
            Cell::new("Description").fg(Color::White),
            Cell::new("File").fg(Color::White),
        ]);
        for chain in &listing.definitions {
            table.add_row(vec![
                Cell::new(&chain.name).fg(Color::Cyan),
                Cell::new(chain.prompts.join(" → ")),
                Cell::new(chain.description.as_deref().unwrap_or("")),
                Cell::new(origin_file(chain)).fg(Color::DarkGrey),
            ]);
        }
        println!();
        println!("{table}");
    }

    if !listing.diagnostics.is_empty() {
        println!();
        for diag in &listing.diagnostics {
            println!(
                "  {} skipped {}: {}",
                style("!").yellow().bold(),
                style(diag.path.display()).yellow(),
                diag.reason
            );
        }
    }

    println!();
    println!(
        "  {} chain{}",
        style(listing.definitions.len()).bold(),
        if listing.definitions.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptchain_types::chain::ChainRecord;
    use std::path::PathBuf;
    use uuid::Uuid;

    #[test]
    fn test_origin_file_shows_file_name() {
        let chain = ChainDefinition::saved(
            ChainRecord {
                name: "review".into(),
                prompts: vec!["a".into()],
                description: None,
            },
            PathBuf::from("/w/.prompts/review.chain.json"),
        );
        assert_eq!(origin_file(&chain), "review.chain.json");
    }

    #[test]
    fn test_origin_file_for_built_chain() {
        let chain = ChainDefinition::built(vec!["a".into()], Uuid::now_v7());
        assert_eq!(origin_file(&chain), "-");
    }
}
