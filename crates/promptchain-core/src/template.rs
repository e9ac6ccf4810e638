//! TemplateStore trait for resolving template identifiers.
//!
//! Defined here so the builder and compositor can be driven without a real
//! filesystem. The `FsTemplateStore` adapter lives in promptchain-infra.

use std::future::Future;

use promptchain_types::error::TemplateError;

/// Read-only access to the template collection.
///
/// Implementations must not cache across calls: each `load_template` reads
/// the currently stored content.
pub trait TemplateStore: Send + Sync {
    /// All template identifiers, sorted ascending, without duplicates.
    ///
    /// A missing backing directory yields an empty list, not an error.
    fn list_templates(&self) -> impl Future<Output = Result<Vec<String>, TemplateError>> + Send;

    /// Fetch the raw content of one template.
    fn load_template(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<String, TemplateError>> + Send;
}
