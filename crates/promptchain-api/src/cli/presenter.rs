//! Terminal menus: the chain picker and the builder's `ChoicePresenter`.
//!
//! Menus run on the blocking pool since dialoguer reads the terminal
//! synchronously. Esc or `q` closes a menu, which counts as Cancel.

use console::style;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;

use promptchain_core::builder::session::ChoicePresenter;
use promptchain_types::builder::{BuilderChoice, ChainBuilderState};
use promptchain_types::chain::ChainDefinition;
use promptchain_types::error::BuilderError;
use promptchain_types::template::human_label;

/// Menu label for the builder entry in the chain picker.
pub const BUILD_CUSTOM_LABEL: &str = "Build a custom chain…";

/// What the user picked in the top-level chain menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainMenuSelection {
    Saved(usize),
    BuildCustom,
    Cancelled,
}

/// Show `prompt` with `items`; `None` when the menu was dismissed.
async fn select(prompt: String, items: Vec<String>) -> Result<Option<usize>, String> {
    tokio::task::spawn_blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("menu task failed: {e}"))?
}

pub fn chain_menu_label(chain: &ChainDefinition) -> String {
    match &chain.description {
        Some(description) => format!("{chain}  {}", style(description).dim()),
        None => chain.to_string(),
    }
}

/// Ask which saved chain to run, or whether to build one.
pub async fn pick_chain(chains: &[ChainDefinition]) -> anyhow::Result<ChainMenuSelection> {
    let mut items: Vec<String> = chains.iter().map(chain_menu_label).collect();
    items.push(BUILD_CUSTOM_LABEL.to_string());

    let picked = select("Select a chain".to_string(), items)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(match picked {
        None => ChainMenuSelection::Cancelled,
        Some(i) if i < chains.len() => ChainMenuSelection::Saved(i),
        Some(_) => ChainMenuSelection::BuildCustom,
    })
}

/// Menu text for one builder choice.
pub fn choice_label(choice: &BuilderChoice, selected: usize) -> String {
    match choice {
        BuilderChoice::PickTemplate(id) => human_label(id),
        BuilderChoice::Finish => format!(
            "✓ Finish chain ({selected} step{})",
            if selected == 1 { "" } else { "s" }
        ),
        BuilderChoice::Cancel => "✗ Cancel".to_string(),
    }
}

/// Menu prompt for the builder's current state.
pub fn builder_prompt(state: &ChainBuilderState) -> String {
    let step = state.selected.len() + 1;
    if state.selected.is_empty() {
        format!("Step {step}: pick the first template")
    } else {
        let so_far: Vec<String> = state.selected.iter().map(|id| human_label(id)).collect();
        format!("Step {step}: pick the next template  [{}]", so_far.join(" → "))
    }
}

/// Presents builder choices with a dialoguer `Select`.
#[derive(Debug, Default)]
pub struct DialoguerPresenter;

impl ChoicePresenter for DialoguerPresenter {
    async fn present(
        &mut self,
        state: &ChainBuilderState,
        choices: &[BuilderChoice],
    ) -> Result<BuilderChoice, BuilderError> {
        let items = choices
            .iter()
            .map(|c| choice_label(c, state.selected.len()))
            .collect();

        let picked = select(builder_prompt(state), items)
            .await
            .map_err(BuilderError::Presenter)?;

        choice_at(choices, picked)
    }
}

/// Map a menu pick back to its choice. A dismissed menu is Cancel.
fn choice_at(choices: &[BuilderChoice], picked: Option<usize>) -> Result<BuilderChoice, BuilderError> {
    match picked {
        None => Ok(BuilderChoice::Cancel),
        Some(i) => choices
            .get(i)
            .cloned()
            .ok_or_else(|| BuilderError::Presenter("menu returned an unknown index".to_string())),
    }
}
