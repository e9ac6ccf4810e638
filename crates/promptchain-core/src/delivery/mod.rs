//! Hand-off of composed documents to the assistant gateway.
//!
//! `gateway` defines the two ports (dispatch, recovery); `deliver` runs
//! dispatch and falls back to recovery so a document is never discarded.

pub mod deliver;
pub mod gateway;

pub use deliver::{DeliveryError, DeliveryOutcome, deliver};
pub use gateway::{AssistantGateway, DocumentRecovery};
