use thiserror::Error;

use crate::builder::BuilderPhase;

/// Errors from resolving or listing templates.
///
/// All variants are recoverable: the caller cannot proceed with that
/// identifier, but the process keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template '{0}' not found")]
    NotFound(String),

    #[error("invalid template identifier '{0}'")]
    InvalidId(String),

    #[error("failed to read template '{id}': {reason}")]
    ReadFailure { id: String, reason: String },
}

/// Errors from parsing or validating a single chain definition file.
#[derive(Debug, Error)]
pub enum ChainDefinitionError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from driving the chain builder state machine.
///
/// Cancellation is not an error; it is `BuilderOutcome::Cancelled`.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("template '{0}' is not in the catalog")]
    UnknownTemplate(String),

    #[error("template '{0}' is already in the chain")]
    AlreadySelected(String),

    #[error("cannot finish an empty chain")]
    EmptyChain,

    #[error("builder session already {0}")]
    SessionClosed(BuilderPhase),

    #[error("failed to list templates: {0}")]
    Catalog(#[from] TemplateError),

    #[error("presenter error: {0}")]
    Presenter(String),
}

/// Errors from rendering a composite document.
#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("chain has no steps")]
    EmptyChain,

    #[error("step {position} ('{id}') could not be loaded: {source}")]
    TemplateLoad {
        id: String,
        position: usize,
        #[source]
        source: TemplateError,
    },
}

/// Errors from handing a document to the assistant gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API key environment variable '{0}' is not set")]
    MissingApiKey(String),

    #[error("gateway is not configured: {0}")]
    NotConfigured(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected gateway response: {0}")]
    Response(String),

    #[error("output error: {0}")]
    Io(String),
}

/// Errors from preserving a document after a failed dispatch.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("recovery I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal preconditions for one invocation. Reported, never retried.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("no workspace root found: {0}")]
    NoWorkspace(String),

    #[error("no active text context (pass --file or --stdin)")]
    NoActiveContext,

    #[error("cannot read context from {source_label}: {reason}")]
    UnreadableContext { source_label: String, reason: String },
}
