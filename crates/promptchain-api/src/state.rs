//! Application state wiring the ports to their concrete adapters.
//!
//! One `AppState` is built per invocation from the resolved workspace root
//! and its `SessionConfig`; every command borrows it.

use std::path::Path;

use promptchain_core::delivery::AssistantGateway;
use promptchain_infra::config::load_session_config;
use promptchain_infra::filesystem::{FsChainStore, FsTemplateStore};
use promptchain_infra::gateway::{HttpChatGateway, StdoutGateway, StreamGateway};
use promptchain_infra::recovery::FileRecovery;
use promptchain_infra::workspace::resolve_workspace_root;
use promptchain_types::config::{GatewayKind, SessionConfig};
use promptchain_types::document::{CompositeDocument, DispatchReceipt};
use promptchain_types::error::GatewayError;

/// The gateway selected by `[gateway] kind`.
///
/// A gateway that cannot be built becomes `Unavailable`; its dispatch always
/// fails and the document goes to recovery.
pub enum ConfiguredGateway {
    Stdout(StdoutGateway),
    /// The stdout gateway under `--json`: the document travels inside the
    /// JSON report, so nothing else may reach stdout.
    StdoutReport(StreamGateway<tokio::io::Sink>),
    Http(HttpChatGateway),
    Unavailable { kind: GatewayKind, reason: GatewayError },
}

impl ConfiguredGateway {
    pub fn from_config(config: &SessionConfig, json: bool) -> Self {
        match config.gateway.kind {
            GatewayKind::Stdout if json => Self::StdoutReport(StreamGateway::new("stdout", tokio::io::sink())),
            GatewayKind::Stdout => Self::Stdout(StdoutGateway::stdout()),
            GatewayKind::Http => match HttpChatGateway::from_config(&config.gateway) {
                Ok(gateway) => Self::Http(gateway),
                Err(reason) => {
                    tracing::warn!(error = %reason, "gateway unavailable");
                    Self::Unavailable {
                        kind: GatewayKind::Http,
                        reason,
                    }
                }
            },
        }
    }

    /// Whether dispatch goes over the network (and may take a while).
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl AssistantGateway for ConfiguredGateway {
    fn name(&self) -> &str {
        match self {
            Self::Stdout(g) => g.name(),
            Self::StdoutReport(g) => g.name(),
            Self::Http(g) => g.name(),
            Self::Unavailable { .. } => "unavailable",
        }
    }

    async fn dispatch(&self, document: &CompositeDocument) -> Result<DispatchReceipt, GatewayError> {
        match self {
            Self::Stdout(g) => g.dispatch(document).await,
            Self::StdoutReport(g) => g.dispatch(document).await,
            Self::Http(g) => g.dispatch(document).await,
            Self::Unavailable { kind, reason } => Err(GatewayError::NotConfigured(format!("{kind} gateway: {reason}"))),
        }
    }
}

/// Shared state for one CLI invocation.
pub struct AppState {
    pub config: SessionConfig,
    pub templates: FsTemplateStore,
    pub chains: FsChainStore,
    pub recovery: FileRecovery,
}

impl AppState {
    /// Resolve the workspace, load its config, and wire the stores.
    pub async fn init(workspace: Option<&Path>) -> anyhow::Result<Self> {
        let root = resolve_workspace_root(workspace)?;
        let config = load_session_config(&root).await;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: SessionConfig) -> Self {
        Self {
            templates: FsTemplateStore::new(config.templates_dir.clone()),
            chains: FsChainStore::new(config.chains_dir.clone()),
            recovery: FileRecovery::new(config.recovery_dir.clone()),
            config,
        }
    }

    /// Build the configured gateway. Only commands that dispatch need one.
    pub fn gateway(&self, json: bool) -> ConfiguredGateway {
        ConfiguredGateway::from_config(&self.config, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptchain_types::config::PromptchainConfig;

    #[test]
    fn stores_follow_session_config() {
        let root = Path::new("/work/project");
        let config = SessionConfig::resolve(root, &PromptchainConfig::default());
        let state = AppState::from_config(config);

        assert_eq!(state.templates.dir(), root.join(".prompts"));
        assert_eq!(state.chains.dir(), root.join(".prompts"));
        assert_eq!(state.recovery.dir(), root.join(".promptchain").join("recovered"));
    }

    #[test]
    fn default_gateway_is_stdout() {
        let config = SessionConfig::resolve(Path::new("/w"), &PromptchainConfig::default());
        let gateway = AppState::from_config(config).gateway(false);
        assert_eq!(gateway.name(), "stdout");
        assert!(matches!(gateway, ConfiguredGateway::Stdout(_)));
        assert!(!gateway.is_remote());
    }

    #[test]
    fn json_mode_keeps_stdout_gateway_off_the_terminal() {
        let config = SessionConfig::resolve(Path::new("/w"), &PromptchainConfig::default());
        let gateway = AppState::from_config(config).gateway(true);
        assert_eq!(gateway.name(), "stdout");
        assert!(matches!(gateway, ConfiguredGateway::StdoutReport(_)));
    }

    #[tokio::test]
    async fn unbuildable_gateway_fails_every_dispatch() {
        let mut config = PromptchainConfig::default();
        config.gateway.kind = GatewayKind::Http;
        config.gateway.endpoint = String::new();
        let state = AppState::from_config(SessionConfig::resolve(Path::new("/w"), &config));

        let gateway = state.gateway(false);
        assert_eq!(gateway.name(), "unavailable");

        let document = CompositeDocument {
            text: "x".to_string(),
            mode: promptchain_types::document::DocumentMode::Single,
            step_count: 1,
        };
        let err = gateway.dispatch(&document).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured(_)));
    }
}
