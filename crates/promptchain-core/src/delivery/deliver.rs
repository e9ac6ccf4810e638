//! Dispatch with recovery fallback.

use promptchain_types::document::{CompositeDocument, DispatchReceipt, RecoveryReceipt};
use promptchain_types::error::{GatewayError, RecoveryError};
use thiserror::Error;

use super::gateway::{AssistantGateway, DocumentRecovery};

/// How a document left the process.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The gateway accepted it.
    Dispatched(DispatchReceipt),
    /// The gateway failed; the document was preserved instead.
    Recovered {
        error: GatewayError,
        receipt: RecoveryReceipt,
    },
}

/// Both dispatch and recovery failed. The document is handed back so the
/// caller can still surface it.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("dispatch failed ({dispatch}) and recovery failed ({recovery})")]
    Unrecoverable {
        document: CompositeDocument,
        dispatch: GatewayError,
        recovery: RecoveryError,
    },
}

/// Dispatch `document`, falling back to `recovery` on gateway failure.
///
/// Recovery is attempted exactly once and only after a failed dispatch.
#[tracing::instrument(skip_all, fields(gateway = gateway.name(), bytes = document.text.len()))]
pub async fn deliver<G, R>(
    gateway: &G,
    recovery: &R,
    document: CompositeDocument,
) -> Result<DeliveryOutcome, DeliveryError>
where
    G: AssistantGateway,
    R: DocumentRecovery,
{
    let error = match gateway.dispatch(&document).await {
        Ok(receipt) => {
            tracing::info!("document dispatched");
            return Ok(DeliveryOutcome::Dispatched(receipt));
        }
        Err(e) => e,
    };

    tracing::warn!(error = %error, "dispatch failed, recovering document");

    match recovery.recover(&document).await {
        Ok(receipt) => {
            tracing::info!(location = %receipt.location, "document recovered");
            Ok(DeliveryOutcome::Recovered { error, receipt })
        }
        Err(recovery_error) => {
            tracing::error!(error = %recovery_error, "document recovery failed");
            Err(DeliveryError::Unrecoverable {
                document,
                dispatch: error,
                recovery: recovery_error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptchain_types::document::DocumentMode;
    use std::sync::Mutex;

    struct RecordingGateway {
        fail: bool,
        sent: Mutex<Vec<String>>,
    }

    impl RecordingGateway {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl AssistantGateway for RecordingGateway {
        fn name(&self) -> &str {
            "recording"
        }

        async fn dispatch(&self, document: &CompositeDocument) -> Result<DispatchReceipt, GatewayError> {
            self.sent.lock().unwrap().push(document.text.clone());
            if self.fail {
                return Err(GatewayError::Transport("connection refused".to_string()));
            }
            Ok(DispatchReceipt {
                gateway: "recording".to_string(),
                reply: None,
            })
        }
    }

    struct RecordingRecovery {
        fail: bool,
        saved: Mutex<Vec<String>>,
    }

    impl RecordingRecovery {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                saved: Mutex::new(Vec::new()),
            }
        }
    }

    impl DocumentRecovery for RecordingRecovery {
        async fn recover(&self, document: &CompositeDocument) -> Result<RecoveryReceipt, RecoveryError> {
            if self.fail {
                return Err(RecoveryError::Io(std::io::Error::other("disk full")));
            }
            self.saved.lock().unwrap().push(document.text.clone());
            Ok(RecoveryReceipt {
                location: "memory".to_string(),
            })
        }
    }

    fn doc(text: &str) -> CompositeDocument {
        CompositeDocument {
            text: text.to_string(),
            mode: DocumentMode::Chain,
            step_count: 2,
        }
    }

    #[tokio::test]
    async fn successful_dispatch_skips_recovery() {
        let gateway = RecordingGateway::new(false);
        let recovery = RecordingRecovery::new(false);

        let outcome = deliver(&gateway, &recovery, doc("hello")).await.unwrap();

        assert!(matches!(outcome, DeliveryOutcome::Dispatched(_)));
        assert_eq!(*gateway.sent.lock().unwrap(), vec!["hello"]);
        assert!(recovery.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_dispatch_recovers_identical_text() {
        let gateway = RecordingGateway::new(true);
        let recovery = RecordingRecovery::new(false);

        let outcome = deliver(&gateway, &recovery, doc("the document")).await.unwrap();

        match outcome {
            DeliveryOutcome::Recovered { error, receipt } => {
                assert!(matches!(error, GatewayError::Transport(_)));
                assert_eq!(receipt.location, "memory");
            }
            other => panic!("expected recovery, got {other:?}"),
        }
        assert_eq!(*recovery.saved.lock().unwrap(), vec!["the document"]);
    }

    #[tokio::test]
    async fn double_failure_returns_document() {
        let gateway = RecordingGateway::new(true);
        let recovery = RecordingRecovery::new(true);

        let err = deliver(&gateway, &recovery, doc("keep me")).await.unwrap_err();

        let DeliveryError::Unrecoverable { document, dispatch, recovery } = err;
        assert_eq!(document.text, "keep me");
        assert!(dispatch.to_string().contains("connection refused"));
        assert!(recovery.to_string().contains("disk full"));
    }
}
