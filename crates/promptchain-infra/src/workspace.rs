//! Workspace root discovery.
//!
//! Priority:
//! 1. An explicit path (`--workspace`)
//! 2. `PROMPTCHAIN_WORKSPACE` environment variable
//! 3. Nearest ancestor of the current directory holding a marker directory

use std::path::{Path, PathBuf};

use promptchain_types::error::PreconditionError;

/// Environment variable overriding workspace discovery.
pub const WORKSPACE_ENV: &str = "PROMPTCHAIN_WORKSPACE";

/// Directory names that mark a workspace root, checked in order.
pub const WORKSPACE_MARKERS: &[&str] = &[".promptchain", ".git"];

/// Resolve the workspace root for this process.
pub fn resolve_workspace_root(explicit: Option<&Path>) -> Result<PathBuf, PreconditionError> {
    let from_env = std::env::var_os(WORKSPACE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let cwd = std::env::current_dir()
        .map_err(|e| PreconditionError::NoWorkspace(format!("cannot read current directory: {e}")))?;
    resolve_from(explicit, from_env.as_deref(), &cwd)
}

/// Resolution with every input passed in.
pub fn resolve_from(
    explicit: Option<&Path>,
    from_env: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf, PreconditionError> {
    if let Some(dir) = explicit {
        return existing_dir(dir, "--workspace");
    }
    if let Some(dir) = from_env {
        return existing_dir(dir, WORKSPACE_ENV);
    }
    find_workspace_root(cwd).ok_or_else(|| {
        PreconditionError::NoWorkspace(format!(
            "no {} directory in {} or any parent",
            WORKSPACE_MARKERS.join(" or "),
            cwd.display()
        ))
    })
}

/// Walk up from `start` until a directory containing a marker is found.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| WORKSPACE_MARKERS.iter().any(|m| dir.join(m).is_dir()))
        .map(Path::to_path_buf)
}

fn existing_dir(dir: &Path, origin: &str) -> Result<PathBuf, PreconditionError> {
    if !dir.is_dir() {
        return Err(PreconditionError::NoWorkspace(format!(
            "{} (from {origin}) is not a directory",
            dir.display()
        )));
    }
    let root = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    tracing::debug!(root = %root.display(), origin, "workspace root from override");
    Ok(root)
}
