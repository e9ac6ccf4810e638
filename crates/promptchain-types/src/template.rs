//! Template domain types.
//!
//! A template is an opaque block of instruction text addressed by a stable
//! identifier (its file name minus the `.md` extension).

/// File extension that marks a template resource.
pub const TEMPLATE_EXTENSION: &str = "md";

/// A loaded template: identifier plus raw content.
///
/// Content is never interpreted; it is inserted verbatim into documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub content: String,
}

impl Template {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Human-readable label for step headers and menus.
    pub fn label(&self) -> String {
        human_label(&self.id)
    }
}

/// Derive a display label from a template identifier.
///
/// Separators (`-`, `_`) become spaces; casing is left alone so the label
/// still reads as the identifier the user picked.
pub fn human_label(id: &str) -> String {
    id.replace(['-', '_'], " ").trim().to_string()
}

/// Whether `id` is safe to resolve as a single file name.
///
/// Rejects empty ids, path separators, and parent-directory segments.
pub fn is_valid_template_id(id: &str) -> bool {
    !id.trim().is_empty()
        && !id.contains('/')
        && !id.contains('\\')
        && !id.contains("..")
        && !id.starts_with('.')
}
