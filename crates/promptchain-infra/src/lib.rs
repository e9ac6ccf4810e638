//! Infrastructure layer for promptchain.
//!
//! Contains implementations of the ports defined in `promptchain-core`:
//! filesystem template and chain stores, the stdout and HTTP assistant
//! gateways, file-based document recovery, plus workspace discovery,
//! config loading, and execution-context capture.

pub mod config;
pub mod context;
pub mod filesystem;
pub mod gateway;
pub mod recovery;
pub mod workspace;
