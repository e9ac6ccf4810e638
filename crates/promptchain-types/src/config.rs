//! Configuration types for promptchain.
//!
//! `PromptchainConfig` mirrors `.promptchain/config.toml` inside a workspace.
//! `SessionConfig` is the same data resolved against the workspace root; it
//! is built once per invocation and handed explicitly to each component.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Workspace-level configuration file contents. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptchainConfig {
    /// Directory holding `*.md` templates, relative to the workspace root.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Directory holding `*.chain.{json,yaml,yml}` files. Defaults to
    /// `templates_dir`.
    #[serde(default)]
    pub chains_dir: Option<PathBuf>,

    /// Where documents are saved when dispatch fails.
    #[serde(default = "default_recovery_dir")]
    pub recovery_dir: PathBuf,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(".prompts")
}

fn default_recovery_dir() -> PathBuf {
    PathBuf::from(".promptchain").join("recovered")
}

impl Default for PromptchainConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            chains_dir: None,
            recovery_dir: default_recovery_dir(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Which assistant gateway receives composed documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayKind {
    /// Write the document to stdout.
    #[default]
    Stdout,
    /// POST to an OpenAI-compatible chat completions endpoint.
    Http,
}

impl fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// `[gateway]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub kind: GatewayKind,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the bearer key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: GatewayKind::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration resolved against a workspace root for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub workspace_root: PathBuf,
    pub templates_dir: PathBuf,
    pub chains_dir: PathBuf,
    pub recovery_dir: PathBuf,
    pub gateway: GatewayConfig,
}

impl SessionConfig {
    /// Join every configured directory onto `workspace_root`.
    ///
    /// Absolute paths in the config are kept as-is (`Path::join` semantics).
    pub fn resolve(workspace_root: &Path, config: &PromptchainConfig) -> Self {
        let templates_dir = workspace_root.join(&config.templates_dir);
        let chains_dir = config
            .chains_dir
            .as_ref()
            .map(|dir| workspace_root.join(dir))
            .unwrap_or_else(|| templates_dir.clone());

        Self {
            workspace_root: workspace_root.to_path_buf(),
            templates_dir,
            chains_dir,
            recovery_dir: workspace_root.join(&config.recovery_dir),
            gateway: config.gateway.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = PromptchainConfig::default();
        assert_eq!(config.templates_dir, PathBuf::from(".prompts"));
        assert!(config.chains_dir.is_none());
        assert_eq!(config.gateway.kind, GatewayKind::Stdout);
        assert_eq!(config.gateway.timeout_secs, 120);
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: PromptchainConfig = toml::from_str("").unwrap();
        assert_eq!(config, PromptchainConfig::default());
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
templates_dir = "prompts"
chains_dir = "prompts/chains"

[gateway]
kind = "http"
endpoint = "http://localhost:8080/v1/chat/completions"
model = "llama3"
"#;
        let config: PromptchainConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("prompts"));
        assert_eq!(config.chains_dir, Some(PathBuf::from("prompts/chains")));
        assert_eq!(config.gateway.kind, GatewayKind::Http);
        assert_eq!(config.gateway.model, "llama3");
        assert_eq!(config.gateway.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_session_config_chains_dir_falls_back_to_templates_dir() {
        let root = PathBuf::from("/work/project");
        let session = SessionConfig::resolve(&root, &PromptchainConfig::default());
        assert_eq!(session.templates_dir, root.join(".prompts"));
        assert_eq!(session.chains_dir, root.join(".prompts"));
        assert_eq!(session.recovery_dir, root.join(".promptchain").join("recovered"));
    }

    #[test]
    fn test_session_config_explicit_chains_dir() {
        let root = PathBuf::from("/work/project");
        let config = PromptchainConfig {
            chains_dir: Some(PathBuf::from("chains")),
            ..PromptchainConfig::default()
        };
        let session = SessionConfig::resolve(&root, &config);
        assert_eq!(session.chains_dir, root.join("chains"));
    }
}
