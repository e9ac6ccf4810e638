//! Chain builder: interactive, step-by-step assembly of a template chain.
//!
//! `state` holds the transition rules over `ChainBuilderState`; `session`
//! drives those transitions through a presentation-agnostic
//! `ChoicePresenter` until the session finalizes or is cancelled.

pub mod session;
pub mod state;
