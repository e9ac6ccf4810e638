//! Business logic and port trait definitions for promptchain.
//!
//! This crate defines the "ports" (template store, chain definition source,
//! choice presenter, assistant gateway, document recovery) that the
//! infrastructure and CLI layers implement. It depends only on
//! `promptchain-types` -- never on `promptchain-infra` or any I/O crate.

pub mod builder;
pub mod chain;
pub mod compose;
pub mod delivery;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;
