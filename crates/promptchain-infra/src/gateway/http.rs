//! HttpChatGateway: posts composed documents to an OpenAI-compatible
//! chat completions endpoint.
//!
//! The bearer key is read from the configured environment variable at
//! dispatch time and wrapped in [`secrecy::SecretString`]; it never appears
//! in logs or `Debug` output. An empty `api_key_env` sends no
//! `Authorization` header (local servers).

use std::time::Duration;

use promptchain_core::delivery::AssistantGateway;
use promptchain_types::config::GatewayConfig;
use promptchain_types::document::{CompositeDocument, DispatchReceipt};
use promptchain_types::error::GatewayError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions gateway. Deliberately not `Debug`.
pub struct HttpChatGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key_env: String,
}

impl HttpChatGateway {
    /// Build from the `[gateway]` config section.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        if config.endpoint.trim().is_empty() {
            return Err(GatewayError::NotConfigured("gateway.endpoint is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::NotConfigured(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    /// The bearer key, or `None` when no key is configured.
    fn api_key(&self) -> Result<Option<SecretString>, GatewayError> {
        if self.api_key_env.is_empty() {
            return Ok(None);
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.is_empty() => Ok(Some(SecretString::from(key))),
            _ => Err(GatewayError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}

impl AssistantGateway for HttpChatGateway {
    fn name(&self) -> &str {
        "http"
    }

    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint, model = %self.model))]
    async fn dispatch(&self, document: &CompositeDocument) -> Result<DispatchReceipt, GatewayError> {
        let api_key = self.api_key()?;

        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &document.text,
            }],
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "gateway rejected document");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Response(format!("failed to parse response: {e}")))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Response("response has no choices".to_string()))?
            .message
            .content;

        tracing::debug!(reply_bytes = reply.as_deref().map_or(0, str::len), "gateway replied");
        Ok(DispatchReceipt {
            gateway: "http".to_string(),
            reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptchain_types::document::DocumentMode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn doc(text: &str) -> CompositeDocument {
        CompositeDocument {
            text: text.to_string(),
            mode: DocumentMode::Chain,
            step_count: 2,
        }
    }

    fn config(endpoint: String, api_key_env: &str) -> GatewayConfig {
        GatewayConfig {
            endpoint,
            model: "test-model".to_string(),
            api_key_env: api_key_env.to_string(),
            timeout_secs: 5,
            ..GatewayConfig::default()
        }
    }

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });

        (format!("http://{addr}/v1/chat/completions"), rx)
    }

    #[tokio::test]
    async fn successful_dispatch_returns_reply() {
        let (endpoint, request) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"Looks fine."}}]}"#,
        )
        .await;
        let gateway = HttpChatGateway::from_config(&config(endpoint, "")).unwrap();

        let receipt = gateway.dispatch(&doc("Review this")).await.unwrap();
        assert_eq!(receipt.gateway, "http");
        assert_eq!(receipt.reply.as_deref(), Some("Looks fine."));

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions"));
        assert!(raw.contains(r#""model":"test-model""#));
        assert!(raw.contains(r#""role":"user""#));
        assert!(raw.contains("Review this"));
        assert!(!raw.to_ascii_lowercase().contains("authorization"));
    }

    #[tokio::test]
    async fn error_status_is_gateway_error() {
        let (endpoint, _request) =
            serve_once("HTTP/1.1 500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let gateway = HttpChatGateway::from_config(&config(endpoint, "")).unwrap();

        let err = gateway.dispatch(&doc("x")).await.unwrap_err();
        match err {
            GatewayError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn response_without_choices_is_response_error() {
        let (endpoint, _request) = serve_once("HTTP/1.1 200 OK", r#"{"choices":[]}"#).await;
        let gateway = HttpChatGateway::from_config(&config(endpoint, "")).unwrap();

        let err = gateway.dispatch(&doc("x")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Response(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway =
            HttpChatGateway::from_config(&config(format!("http://{addr}/v1/chat/completions"), "")).unwrap();
        let err = gateway.dispatch(&doc("x")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        let gateway = HttpChatGateway::from_config(&config(
            "http://127.0.0.1:9/v1/chat/completions".to_string(),
            "PROMPTCHAIN_TEST_KEY_NEVER_SET",
        ))
        .unwrap();

        let err = gateway.dispatch(&doc("x")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key environment variable 'PROMPTCHAIN_TEST_KEY_NEVER_SET' is not set"
        );
    }

    #[test]
    fn empty_endpoint_is_not_configured() {
        let result = HttpChatGateway::from_config(&config(String::new(), ""));
        assert!(matches!(result, Err(GatewayError::NotConfigured(_))));
    }
}
