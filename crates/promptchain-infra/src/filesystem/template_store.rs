//! Filesystem-based template store.
//!
//! Templates are the `*.md` files directly inside the templates directory:
//!
//! ```text
//! {templates_dir}/
//!   summarize.md      -> "summarize"
//!   code-review.md    -> "code-review"
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use promptchain_core::template::TemplateStore;
use promptchain_types::error::TemplateError;
use promptchain_types::template::{TEMPLATE_EXTENSION, is_valid_template_id};

use super::is_regular_file;

/// Template store rooted at a configured directory.
#[derive(Debug, Clone)]
pub struct FsTemplateStore {
    dir: PathBuf,
}

impl FsTemplateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file backing `id`.
    pub fn template_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{TEMPLATE_EXTENSION}"))
    }

    fn listing_error(&self, err: std::io::Error) -> TemplateError {
        TemplateError::ReadFailure {
            id: self.dir.display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Template identifier for `path`, if it follows the naming convention.
fn template_id(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != TEMPLATE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    is_valid_template_id(stem).then(|| stem.to_string())
}

impl TemplateStore for FsTemplateStore {
    async fn list_templates(&self) -> Result<Vec<String>, TemplateError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %self.dir.display(), "templates directory missing, no templates");
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.listing_error(err)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.listing_error(e))?
        {
            let path = entry.path();
            let Some(id) = template_id(&path) else {
                continue;
            };
            if is_regular_file(&path).await {
                ids.push(id);
            }
        }

        ids.sort();
        ids.dedup();
        tracing::debug!(dir = %self.dir.display(), count = ids.len(), "listed templates");
        Ok(ids)
    }

    async fn load_template(&self, id: &str) -> Result<String, TemplateError> {
        if !is_valid_template_id(id) {
            return Err(TemplateError::InvalidId(id.to_string()));
        }

        let path = self.template_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(TemplateError::NotFound(id.to_string()));
            }
            Err(err) => {
                return Err(TemplateError::ReadFailure {
                    id: id.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        String::from_utf8(bytes).map_err(|e| TemplateError::ReadFailure {
            id: id.to_string(),
            reason: format!("not valid UTF-8: {e}"),
        })
    }
}
