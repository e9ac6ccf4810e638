//! Port for listing persisted chain definitions.

use std::future::Future;

use promptchain_types::chain::ChainListing;

/// Source of saved chain definitions.
///
/// Listing never fails: an absent or unreadable directory is an empty
/// listing, and malformed files become diagnostics. Definitions are returned
/// in discovery order.
pub trait ChainDefinitionSource: Send + Sync {
    fn list_chain_definitions(&self) -> impl Future<Output = ChainListing> + Send;
}
