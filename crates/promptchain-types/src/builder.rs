//! Chain builder domain types.
//!
//! The builder walks a user through assembling an ordered chain one template
//! at a time. `ChainBuilderState` is the per-session accumulator; the
//! transition logic lives in `promptchain_core::builder::state`.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::chain::ChainDefinition;

/// Lifecycle phase of a builder session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderPhase {
    Selecting,
    Finalized,
    Cancelled,
}

impl BuilderPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Selecting)
    }
}

impl fmt::Display for BuilderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selecting => write!(f, "selecting"),
            Self::Finalized => write!(f, "finalized"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One response from whatever presents the builder menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum BuilderChoice {
    /// Append this template to the chain.
    PickTemplate(String),
    /// Stop selecting and finalize the chain.
    Finish,
    /// Abandon the session without producing a chain.
    Cancel,
}

/// Mutable state of one interactive builder session.
///
/// `catalog` is the template listing captured when the session started.
/// Available identifiers are always derived as `catalog - selected`, never
/// stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBuilderState {
    pub session_id: Uuid,
    pub catalog: Vec<String>,
    pub selected: Vec<String>,
    pub phase: BuilderPhase,
}

/// Terminal result of a builder session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderOutcome {
    Finalized(ChainDefinition),
    Cancelled,
}
