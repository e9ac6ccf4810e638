//! ChainBuilderState transition logic.
//!
//! The `ChainBuilderState` struct lives in `promptchain-types`; this module
//! provides an extension trait (`ChainBuilderStateExt`) with the state
//! machine: deriving the available templates, listing the choices to offer,
//! and applying a choice. The types crate stays free of behavior, so the
//! transitions hang off a trait that callers import alongside the state.

use promptchain_types::builder::{BuilderChoice, BuilderOutcome, BuilderPhase, ChainBuilderState};
use promptchain_types::chain::ChainDefinition;
use promptchain_types::error::BuilderError;
use uuid::Uuid;

/// Create the state for a fresh builder session.
///
/// Starts in `Selecting` with nothing selected. Duplicate catalog entries
/// are collapsed, keeping the first occurrence.
pub fn new_builder_state(session_id: Uuid, catalog: Vec<String>) -> ChainBuilderState {
    let mut unique = Vec::with_capacity(catalog.len());
    for id in catalog {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    ChainBuilderState {
        session_id,
        catalog: unique,
        selected: Vec::new(),
        phase: BuilderPhase::Selecting,
    }
}

/// Extension trait for `ChainBuilderState` transitions.
pub trait ChainBuilderStateExt {
    /// Catalog entries not yet selected, in catalog order.
    fn available(&self) -> Vec<&str>;

    /// Whether `Finish` may be offered.
    fn can_finish(&self) -> bool;

    /// Choices to present for the current state.
    ///
    /// One `PickTemplate` per available template, then `Finish` when the
    /// chain is non-empty, then `Cancel`. Empty once the session is over.
    fn offered_choices(&self) -> Vec<BuilderChoice>;

    /// Apply one choice. Invalid choices leave the state untouched.
    fn apply(&mut self, choice: BuilderChoice) -> Result<BuilderPhase, BuilderError>;

    /// The terminal result, or `None` while still selecting.
    fn outcome(&self) -> Option<BuilderOutcome>;
}

impl ChainBuilderStateExt for ChainBuilderState {
    fn available(&self) -> Vec<&str> {
        self.catalog
            .iter()
            .filter(|id| !self.selected.contains(id))
            .map(String::as_str)
            .collect()
    }

    fn can_finish(&self) -> bool {
        self.phase == BuilderPhase::Selecting && !self.selected.is_empty()
    }

    fn offered_choices(&self) -> Vec<BuilderChoice> {
        if self.phase.is_terminal() {
            return Vec::new();
        }

        let mut choices: Vec<BuilderChoice> = self
            .available()
            .into_iter()
            .map(|id| BuilderChoice::PickTemplate(id.to_string()))
            .collect();

        if self.can_finish() {
            choices.push(BuilderChoice::Finish);
        }
        choices.push(BuilderChoice::Cancel);
        choices
    }

    fn apply(&mut self, choice: BuilderChoice) -> Result<BuilderPhase, BuilderError> {
        if self.phase.is_terminal() {
            return Err(BuilderError::SessionClosed(self.phase));
        }

        match choice {
            BuilderChoice::PickTemplate(id) => {
                if self.selected.contains(&id) {
                    return Err(BuilderError::AlreadySelected(id));
                }
                if !self.catalog.contains(&id) {
                    return Err(BuilderError::UnknownTemplate(id));
                }
                self.selected.push(id);
            }
            BuilderChoice::Finish => {
                if self.selected.is_empty() {
                    return Err(BuilderError::EmptyChain);
                }
                self.phase = BuilderPhase::Finalized;
            }
            BuilderChoice::Cancel => {
                self.phase = BuilderPhase::Cancelled;
            }
        }

        Ok(self.phase)
    }

    fn outcome(&self) -> Option<BuilderOutcome> {
        match self.phase {
            BuilderPhase::Selecting => None,
            BuilderPhase::Finalized => Some(BuilderOutcome::Finalized(ChainDefinition::built(
                self.selected.clone(),
                self.session_id,
            ))),
            BuilderPhase::Cancelled => Some(BuilderOutcome::Cancelled),
        }
    }
}
