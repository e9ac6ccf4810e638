//! Context-source flags shared by `run` and `chain`.

use std::path::PathBuf;

use clap::Args;
use promptchain_infra::context::{LineRange, read_file_context, read_stdin_context};
use promptchain_types::context::ExecutionContext;
use promptchain_types::error::PreconditionError;

#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Read the code under analysis from this file.
    #[arg(long, short, value_name = "PATH", conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Only use these lines of --file (1-based, inclusive).
    #[arg(long, value_name = "START:END", requires = "file")]
    pub lines: Option<LineRange>,

    /// Read the code under analysis from stdin.
    #[arg(long)]
    pub stdin: bool,

    /// Extra instructions added to the document.
    #[arg(long, value_name = "TEXT")]
    pub note: Option<String>,
}

impl ContextArgs {
    /// Capture the execution context described by these flags.
    pub async fn capture(&self) -> Result<ExecutionContext, PreconditionError> {
        let ctx = match (&self.file, self.stdin) {
            (Some(path), _) => read_file_context(path, self.lines).await?,
            (None, true) => read_stdin_context().await?,
            (None, false) => return Err(PreconditionError::NoActiveContext),
        };
        Ok(ctx.with_note(self.note.clone()))
    }
}
