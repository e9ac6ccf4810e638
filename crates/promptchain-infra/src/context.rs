//! Capture of the active text context (the code under analysis).
//!
//! The context comes from a file (optionally narrowed to a line range) or
//! from stdin. It is read once, before composition starts.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use promptchain_types::context::{ExecutionContext, language_for_extension};
use promptchain_types::error::PreconditionError;
use tokio::io::AsyncReadExt;

/// Inclusive, 1-based line range (`A:B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
        let start: usize = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start line '{start}'"))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end line '{end}'"))?;

        if start == 0 {
            return Err("line numbers start at 1".to_string());
        }
        if end < start {
            return Err(format!("end line {end} is before start line {start}"));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Lines `range.start..=range.end` of `text`, clamped at EOF.
///
/// Line terminators inside the range are preserved. A start of 0 reads as
/// line 1; an inverted range selects nothing.
pub fn select_lines(text: &str, range: LineRange) -> String {
    let first = range.start.max(1);
    if range.end < first {
        return String::new();
    }
    text.split_inclusive('\n')
        .skip(first - 1)
        .take(range.end - first + 1)
        .collect()
}

/// Read `path` (or part of it) into an execution context.
pub async fn read_file_context(
    path: &Path,
    lines: Option<LineRange>,
) -> Result<ExecutionContext, PreconditionError> {
    let label = path.display().to_string();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PreconditionError::UnreadableContext {
            source_label: label.clone(),
            reason: e.to_string(),
        })?;

    let (snippet, source) = match lines {
        Some(range) => (select_lines(&text, range), format!("{label}:{range}")),
        None => (text, label),
    };

    let language = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(language_for_extension)
        .map(str::to_string);

    tracing::debug!(source = %source, bytes = snippet.len(), language = ?language, "captured file context");
    Ok(ExecutionContext::new(snippet)
        .with_language(language)
        .with_source(source))
}

/// Read all of stdin into an execution context.
pub async fn read_stdin_context() -> Result<ExecutionContext, PreconditionError> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(|e| PreconditionError::UnreadableContext {
            source_label: "stdin".to_string(),
            reason: e.to_string(),
        })?;

    tracing::debug!(bytes = text.len(), "captured stdin context");
    Ok(ExecutionContext::new(text).with_source("stdin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TEXT: &str = "one\ntwo\nthree\nfour\n";

    #[test]
    fn parses_range() {
        assert_eq!("3:7".parse::<LineRange>(), Ok(LineRange { start: 3, end: 7 }));
        assert_eq!("5:5".parse::<LineRange>(), Ok(LineRange { start: 5, end: 5 }));
    }

    #[test]
    fn rejects_malformed_ranges() {
        for bad in ["", "3", "a:b", "0:2", "5:2", "-1:3"] {
            assert!(bad.parse::<LineRange>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn selects_inclusive_range() {
        let range = LineRange { start: 2, end: 3 };
        assert_eq!(select_lines(TEXT, range), "two\nthree\n");
    }

    #[test]
    fn clamps_end_past_eof() {
        let range = LineRange { start: 3, end: 99 };
        assert_eq!(select_lines(TEXT, range), "three\nfour\n");
    }

    #[test]
    fn hand_built_ranges_do_not_underflow() {
        assert_eq!(select_lines(TEXT, LineRange { start: 0, end: 2 }), "one\ntwo\n");
        assert_eq!(select_lines(TEXT, LineRange { start: 3, end: 2 }), "");
        assert_eq!(select_lines(TEXT, LineRange { start: 0, end: 0 }), "");
    }

    #[test]
    fn range_starting_past_eof_is_empty() {
        let range = LineRange { start: 10, end: 12 };
        assert_eq!(select_lines(TEXT, range), "");
    }

    #[tokio::test]
    async fn file_context_carries_language_and_source() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lib.rs");
        std::fs::write(&path, "fn a() {}\nfn b() {}\nfn c() {}\n").unwrap();

        let ctx = read_file_context(&path, Some(LineRange { start: 2, end: 2 }))
            .await
            .unwrap();

        assert_eq!(ctx.code_snippet, "fn b() {}\n");
        assert_eq!(ctx.language.as_deref(), Some("rust"));
        assert_eq!(ctx.source, Some(format!("{}:2-2", path.display())));
    }

    #[tokio::test]
    async fn empty_file_is_allowed() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let ctx = read_file_context(&path, None).await.unwrap();
        assert!(!ctx.has_code());
    }

    #[tokio::test]
    async fn missing_file_is_unreadable_context() {
        let tmp = tempdir().unwrap();
        let err = read_file_context(&tmp.path().join("nope.rs"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PreconditionError::UnreadableContext { .. }));
    }
}
