//! Filesystem-based chain definition source.
//!
//! Scans one directory for `*.chain.json`, `*.chain.yaml`, and
//! `*.chain.yml` files. Files are read in ascending file-name order and
//! parsed independently; a broken file becomes a diagnostic and the scan
//! moves on.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use promptchain_core::chain::definition::{chain_format, parse_chain_file};
use promptchain_core::chain::source::ChainDefinitionSource;
use promptchain_types::chain::{ChainDiagnostic, ChainListing};
use promptchain_types::error::ChainDefinitionError;

use super::is_regular_file;

#[derive(Debug, Clone)]
pub struct FsChainStore {
    dir: PathBuf,
}

impl FsChainStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of candidate definition files, sorted by file name.
    async fn candidate_paths(&self) -> Vec<PathBuf> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %self.dir.display(), "chains directory missing, no chains");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(dir = %self.dir.display(), error = %err, "cannot enumerate chains directory");
                return Vec::new();
            }
        };

        let mut paths = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let path = entry.path();
                    if chain_format(&path).is_some() && is_regular_file(&path).await {
                        paths.push(path);
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(dir = %self.dir.display(), error = %err, "chains directory enumeration interrupted");
                    return Vec::new();
                }
            }
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        paths
    }
}

impl ChainDefinitionSource for FsChainStore {
    async fn list_chain_definitions(&self) -> ChainListing {
        let mut listing = ChainListing::default();

        for path in self.candidate_paths().await {
            let parsed = match tokio::fs::read_to_string(&path).await {
                Ok(content) => parse_chain_file(&path, &content).map_err(|e| e.to_string()),
                Err(err) => Err(ChainDefinitionError::Io(err).to_string()),
            };

            match parsed {
                Ok(chain) => listing.definitions.push(chain),
                Err(reason) => {
                    tracing::warn!(path = %path.display(), error = %reason, "skipping malformed chain definition");
                    listing.diagnostics.push(ChainDiagnostic { path, reason });
                }
            }
        }

        tracing::debug!(
            dir = %self.dir.display(),
            valid = listing.definitions.len(),
            skipped = listing.diagnostics.len(),
            "listed chain definitions"
        );
        listing
    }
}
