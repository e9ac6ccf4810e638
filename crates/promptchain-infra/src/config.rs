//! Workspace configuration loader.
//!
//! Reads `.promptchain/config.toml` under the workspace root and
//! deserializes it into [`PromptchainConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use promptchain_types::config::{PromptchainConfig, SessionConfig};

/// Directory inside the workspace holding promptchain state.
pub const CONFIG_DIR: &str = ".promptchain";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Gateway timeouts below this are raised to it.
const MIN_TIMEOUT_SECS: u64 = 1;

/// Path of the config file for `workspace_root`.
pub fn config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load `{workspace_root}/.promptchain/config.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: warning, then defaults.
pub async fn load_config(workspace_root: &Path) -> PromptchainConfig {
    let path = config_path(workspace_root);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return PromptchainConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return PromptchainConfig::default();
        }
    };

    match toml::from_str::<PromptchainConfig>(&content) {
        Ok(mut config) => {
            config.gateway.timeout_secs = config.gateway.timeout_secs.max(MIN_TIMEOUT_SECS);
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            PromptchainConfig::default()
        }
    }
}

/// Load the config and resolve every directory against `workspace_root`.
pub async fn load_session_config(workspace_root: &Path) -> SessionConfig {
    let config = load_config(workspace_root).await;
    let session = SessionConfig::resolve(workspace_root, &config);
    tracing::debug!(
        root = %session.workspace_root.display(),
        templates = %session.templates_dir.display(),
        chains = %session.chains_dir.display(),
        gateway = %session.gateway.kind,
        "session configured"
    );
    session
}
