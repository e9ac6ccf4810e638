//! Filesystem adapters for templates and chain definitions.
//!
//! Both stores read a single flat directory through `tokio::fs`. Neither
//! caches: every call reflects what is on disk right now.

pub mod chain_store;
pub mod template_store;

pub use chain_store::FsChainStore;
pub use template_store::FsTemplateStore;

use std::path::Path;

/// Whether `path` is (or links to) a regular file.
async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
