//! Execution context captured once per invocation.

use serde::Serialize;

/// The code under analysis plus an optional free-text note.
///
/// Captured before composition starts and shared read-only by every step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionContext {
    /// Selected code; may be empty.
    pub code_snippet: String,
    /// Extra instructions typed by the user.
    pub note: Option<String>,
    /// Fence language hint (e.g. `rust`).
    pub language: Option<String>,
    /// Where the snippet came from, for logging (`src/lib.rs:10-20`, `stdin`).
    pub source: Option<String>,
}

impl ExecutionContext {
    pub fn new(code_snippet: impl Into<String>) -> Self {
        Self {
            code_snippet: code_snippet.into(),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whitespace-only selections count as empty.
    pub fn has_code(&self) -> bool {
        !self.code_snippet.trim().is_empty()
    }

    /// The note, if present and not blank.
    pub fn note_text(&self) -> Option<&str> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Map a file extension to a Markdown fence language.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let lang = match ext.to_ascii_lowercase().as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" | "mts" => "typescript",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "json" => "json",
        "md" => "markdown",
        "html" => "html",
        "css" => "css",
        _ => return None,
    };
    Some(lang)
}
