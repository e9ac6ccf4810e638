//! Chain compositor.
//!
//! `render` holds the pure text assembly; `compositor` loads the templates
//! a chain references (atomically, in order) and hands them to `render`.

pub mod compositor;
pub mod render;

pub use compositor::{compose_chain, compose_single};
pub use render::{CLOSING_INSTRUCTION, CODE_INTRO, FRAMING_SENTENCE, NOTE_PREFIX};
