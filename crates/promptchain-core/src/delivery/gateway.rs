//! AssistantGateway and DocumentRecovery traits.
//!
//! Implementations live in promptchain-infra (stdout, HTTP chat endpoint,
//! recovery file). Uses RPITIT like every other port in this crate.

use std::future::Future;

use promptchain_types::document::{CompositeDocument, DispatchReceipt, RecoveryReceipt};
use promptchain_types::error::{GatewayError, RecoveryError};

/// External conversational backend that consumes finished documents.
pub trait AssistantGateway: Send + Sync {
    /// Short name for logs and receipts (e.g. "stdout", "http").
    fn name(&self) -> &str;

    /// Hand the document over. The receipt is informational only.
    fn dispatch(
        &self,
        document: &CompositeDocument,
    ) -> impl Future<Output = Result<DispatchReceipt, GatewayError>> + Send;
}

/// Preserves a document the gateway could not accept, so the user can
/// still retrieve it.
pub trait DocumentRecovery: Send + Sync {
    fn recover(
        &self,
        document: &CompositeDocument,
    ) -> impl Future<Output = Result<RecoveryReceipt, RecoveryError>> + Send;
}
