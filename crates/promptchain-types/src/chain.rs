//! Chain definition types.
//!
//! `ChainRecord` is the persisted shape of a `*.chain.json` / `*.chain.yaml`
//! file. `ChainDefinition` is the validated, immutable domain value that the
//! compositor consumes, tagged with where it came from.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File-name suffixes that mark a chain definition resource.
pub const CHAIN_SUFFIXES: &[&str] = &[".chain.json", ".chain.yaml", ".chain.yml"];

/// Name given to chains assembled interactively by the builder.
pub const CUSTOM_CHAIN_NAME: &str = "custom chain";

/// Persisted chain definition record.
///
/// ```json
/// { "name": "review", "prompts": ["summarize", "risks"], "description": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainRecord {
    pub name: String,
    pub prompts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where a chain definition came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainOrigin {
    /// Loaded from a definition file.
    Saved { path: PathBuf },
    /// Assembled by an interactive builder session.
    Built { session_id: Uuid },
}

/// A named, ordered sequence of template identifiers.
///
/// Construct via `promptchain_core::chain::definition` (validated) or
/// `ChainDefinition::built` (builder output, already non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainDefinition {
    pub name: String,
    pub prompts: Vec<String>,
    pub description: Option<String>,
    pub origin: ChainOrigin,
}

impl ChainDefinition {
    /// Wrap a record loaded from `path`. Validation is the caller's job.
    pub fn saved(record: ChainRecord, path: PathBuf) -> Self {
        Self {
            name: record.name,
            prompts: record.prompts,
            description: record.description,
            origin: ChainOrigin::Saved { path },
        }
    }

    /// Anonymous chain produced by a finalized builder session.
    pub fn built(prompts: Vec<String>, session_id: Uuid) -> Self {
        Self {
            name: CUSTOM_CHAIN_NAME.to_string(),
            prompts,
            description: None,
            origin: ChainOrigin::Built { session_id },
        }
    }

    /// Number of steps in the chain.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

impl fmt::Display for ChainDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.prompts.join(" -> "))
    }
}

/// A definition file that was skipped during listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainDiagnostic {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning the chains directory.
///
/// Malformed files never fail the listing; they land in `diagnostics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainListing {
    pub definitions: Vec<ChainDefinition>,
    pub diagnostics: Vec<ChainDiagnostic>,
}

impl ChainListing {
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
