//! Pure rendering of composite documents.
//!
//! Chain layout:
//!
//! ````text
//! Here is the code to analyze:      (only when the snippet is non-blank)
//! ```<lang>
//! <snippet>
//! ```
//! Additional context: <note>        (only when the note is non-blank)
//! <framing sentence>
//! ## Step 1: <label>
//! <template 1 content>
//! ...
//! <closing instruction>
//! ````
//!
//! Single-prompt layout is template content, then the note, then the code
//! block, with no framing, headers, or closing.

use promptchain_types::context::ExecutionContext;
use promptchain_types::document::{CompositeDocument, DocumentMode};
use promptchain_types::template::Template;

pub const CODE_INTRO: &str = "Here is the code to analyze:";

pub const NOTE_PREFIX: &str = "Additional context:";

pub const FRAMING_SENTENCE: &str = "Work through the following steps in order. \
Each step builds on the insights of the previous one.";

pub const CLOSING_INSTRUCTION: &str = "Execute each step in order, labeling each step clearly, \
and build on the insights from previous steps.";

/// Render a chain document from already-loaded templates, in the given order.
pub fn render_chain(steps: &[Template], ctx: &ExecutionContext) -> CompositeDocument {
    let content_len: usize = steps.iter().map(|t| t.content.len()).sum();
    let mut out = String::with_capacity(content_len + ctx.code_snippet.len() + 512);

    push_code_block(&mut out, ctx);
    push_note(&mut out, ctx);

    out.push_str(FRAMING_SENTENCE);
    out.push_str("\n\n");

    for (i, step) in steps.iter().enumerate() {
        out.push_str(&step_header(i + 1, &step.label()));
        out.push_str("\n\n");
        out.push_str(&step.content);
        out.push_str("\n\n");
    }

    out.push_str(CLOSING_INSTRUCTION);

    CompositeDocument {
        text: out,
        mode: DocumentMode::Chain,
        step_count: steps.len(),
    }
}

/// Render the single-prompt document for one template.
pub fn render_single(template: &Template, ctx: &ExecutionContext) -> CompositeDocument {
    let mut out = String::with_capacity(template.content.len() + ctx.code_snippet.len() + 128);

    out.push_str(template.content.trim_end_matches('\n'));
    out.push_str("\n\n");
    push_note(&mut out, ctx);
    push_code_block(&mut out, ctx);

    let text = out.trim_end().to_string();
    CompositeDocument {
        text,
        mode: DocumentMode::Single,
        step_count: 1,
    }
}

/// `## Step <index>: <label>`
pub fn step_header(index: usize, label: &str) -> String {
    format!("## Step {index}: {label}")
}

fn push_code_block(out: &mut String, ctx: &ExecutionContext) {
    if !ctx.has_code() {
        return;
    }

    let fence = fence_for(&ctx.code_snippet);
    out.push_str(CODE_INTRO);
    out.push_str("\n\n");
    out.push_str(&fence);
    if let Some(lang) = &ctx.language {
        out.push_str(lang);
    }
    out.push('\n');
    out.push_str(ctx.code_snippet.trim_end_matches('\n'));
    out.push('\n');
    out.push_str(&fence);
    out.push_str("\n\n");
}

fn push_note(out: &mut String, ctx: &ExecutionContext) {
    if let Some(note) = ctx.note_text() {
        out.push_str(NOTE_PREFIX);
        out.push(' ');
        out.push_str(note);
        out.push_str("\n\n");
    }
}

/// A backtick fence longer than any backtick run inside `snippet`.
fn fence_for(snippet: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in snippet.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}
