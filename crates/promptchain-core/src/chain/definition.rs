//! Chain definition parsing, validation, and lookup.
//!
//! Converts `*.chain.json` / `*.chain.yaml` file contents into validated
//! `ChainDefinition` values and answers questions about them (which one has
//! this name, which of its steps the template store cannot resolve).

use std::collections::HashSet;
use std::path::Path;

use promptchain_types::chain::{CHAIN_SUFFIXES, ChainDefinition, ChainListing, ChainRecord};
use promptchain_types::error::ChainDefinitionError;

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// Serialization format of a chain definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFormat {
    Json,
    Yaml,
}

/// Detect the chain format from a file name, or `None` if the file is not a
/// chain definition at all.
pub fn chain_format(path: &Path) -> Option<ChainFormat> {
    let name = path.file_name()?.to_str()?;
    let suffix = CHAIN_SUFFIXES.iter().find(|s| name.ends_with(*s))?;
    // A bare ".chain.json" has no stem and is not a definition.
    if name.len() == suffix.len() {
        return None;
    }
    if *suffix == ".chain.json" {
        Some(ChainFormat::Json)
    } else {
        Some(ChainFormat::Yaml)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse and validate a chain record in the given format.
pub fn parse_chain_record(
    content: &str,
    format: ChainFormat,
) -> Result<ChainRecord, ChainDefinitionError> {
    let record: ChainRecord = match format {
        ChainFormat::Json => serde_json::from_str(content)
            .map_err(|e| ChainDefinitionError::Parse(e.to_string()))?,
        ChainFormat::Yaml => serde_yaml_ng::from_str(content)
            .map_err(|e| ChainDefinitionError::Parse(e.to_string()))?,
    };
    validate_chain_record(&record)?;
    Ok(record)
}

/// Parse the contents of the definition file at `path`.
///
/// The format is picked from the file suffix; `path` is recorded as the
/// definition's origin.
pub fn parse_chain_file(path: &Path, content: &str) -> Result<ChainDefinition, ChainDefinitionError> {
    let format = chain_format(path).ok_or_else(|| {
        ChainDefinitionError::Parse(format!(
            "'{}' does not use a chain definition suffix",
            path.display()
        ))
    })?;
    let record = parse_chain_record(content, format)?;
    Ok(ChainDefinition::saved(record, path.to_path_buf()))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate structural constraints on a `ChainRecord`.
///
/// Checks:
/// - Name is non-empty after trimming
/// - At least one prompt exists
/// - Every prompt identifier is non-empty
///
/// Repeated identifiers are allowed in saved definitions.
pub fn validate_chain_record(record: &ChainRecord) -> Result<(), ChainDefinitionError> {
    if record.name.trim().is_empty() {
        return Err(ChainDefinitionError::Validation(
            "chain name must not be empty".to_string(),
        ));
    }

    if record.prompts.is_empty() {
        return Err(ChainDefinitionError::Validation(format!(
            "chain '{}' must have at least one prompt",
            record.name
        )));
    }

    if let Some(pos) = record.prompts.iter().position(|p| p.trim().is_empty()) {
        return Err(ChainDefinitionError::Validation(format!(
            "chain '{}' has an empty prompt identifier at position {}",
            record.name,
            pos + 1
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find a chain by name: exact match first, then ASCII case-insensitive.
pub fn find_chain<'a>(listing: &'a ChainListing, name: &str) -> Option<&'a ChainDefinition> {
    listing
        .definitions
        .iter()
        .find(|c| c.name == name)
        .or_else(|| {
            listing
                .definitions
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
}

/// Identifiers referenced by `chain` that are not in `available`.
///
/// Returned in chain order, each reported once.
pub fn unresolved_templates(chain: &ChainDefinition, available: &[String]) -> Vec<String> {
    let known: HashSet<&str> = available.iter().map(String::as_str).collect();
    let mut reported = HashSet::new();
    chain
        .prompts
        .iter()
        .filter(|id| !known.contains(id.as_str()))
        .filter(|id| reported.insert(id.as_str()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
