//! File-based document recovery.
//!
//! When dispatch fails the document is written to
//! `{recovery_dir}/{YYYYmmdd-HHMMSS}-{8 hex}.md` so the user can retrieve it.

use std::path::{Path, PathBuf};

use promptchain_core::delivery::DocumentRecovery;
use promptchain_types::document::{CompositeDocument, RecoveryReceipt};
use promptchain_types::error::RecoveryError;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FileRecovery {
    dir: PathBuf,
}

impl FileRecovery {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// A fresh, collision-resistant file name.
    fn file_name() -> String {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let suffix = Uuid::now_v7().simple().to_string();
        // The tail of a v7 UUID is random; the head is the timestamp.
        format!("{stamp}-{}.md", &suffix[suffix.len() - 8..])
    }
}

impl DocumentRecovery for FileRecovery {
    async fn recover(&self, document: &CompositeDocument) -> Result<RecoveryReceipt, RecoveryError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name());
        tokio::fs::write(&path, &document.text).await?;

        tracing::debug!(path = %path.display(), bytes = document.text.len(), "document written for recovery");
        Ok(RecoveryReceipt {
            location: path.display().to_string(),
        })
    }
}
