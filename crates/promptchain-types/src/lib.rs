//! Shared domain types for promptchain.
//!
//! This crate contains the core domain types used across the workspace:
//! templates, chain definitions, builder state, execution context, the
//! composite document, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod builder;
pub mod chain;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod template;
