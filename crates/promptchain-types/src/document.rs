//! The composite document and what happens to it after composition.

use std::fmt;

use serde::Serialize;

/// Which composition path produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentMode {
    Single,
    Chain,
}

/// The single rendered text sent to the assistant gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeDocument {
    pub text: String,
    pub mode: DocumentMode,
    pub step_count: usize,
}

impl fmt::Display for CompositeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Acknowledgement from a gateway that accepted a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReceipt {
    pub gateway: String,
    /// Assistant reply text, when the gateway returns one. Display only.
    pub reply: Option<String>,
}

/// Where a document was preserved after a failed dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryReceipt {
    pub location: String,
}
