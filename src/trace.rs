//! Trace records and stack-diff rendering
//!
//! A trace record pairs one formatted operation call with the user call
//! context that produced it. Rendering shows only the part of the context
//! that differs from the immediately preceding record, indented to its
//! stack depth, so a call path repeated across consecutive operations
//! prints once. Rendering is a pure function of the store and an index:
//! safe to call repeatedly, streaming or as replay, with identical output.

use serde::{Deserialize, Serialize};

use crate::error::{RastroError, Result};
use crate::stack::FrameDescriptor;

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Glyph marking a frame whose call descends further down the stack
const DESCENDS: &str = "⬇️";

/// Displayed snippet length before truncation kicks in
const SNIPPET_MAX: usize = 40;

/// Placeholder returned when rendering an empty store
pub const NO_TRACES: &str = "<no traces>";

/// One captured operation invocation plus its call context
///
/// Immutable once appended to a session's store. The context is ordered
/// outermost caller first and contains no runtime-internal frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Formatted call expression, e.g. `add(f32[2, 3], f32[2, 3])`
    pub op: String,
    /// Call context, outermost caller first
    pub context: Vec<FrameDescriptor>,
}

/// Render the record at `index` against its predecessor
///
/// Negative indices count from the end (`-1` is the newest record). An
/// empty store renders the [`NO_TRACES`] placeholder. For `index > 1` the
/// leading frames shared with record `index - 1` are omitted and the
/// remaining suffix is indented at its true stack depth; records 0 and 1
/// always render their full context.
///
/// Each line shows the call-site snippet (truncated past 40 characters),
/// then `  # <file>:<line> in <function>: ` and a trailing marker: the
/// operation call plus `;` on the deepest line, a descent glyph above it.
///
/// # Errors
///
/// Returns [`RastroError::TraceIndexOutOfRange`] when the index resolves
/// outside the store.
pub fn render(traces: &[TraceRecord], index: isize) -> Result<String> {
    if traces.is_empty() {
        return Ok(NO_TRACES.to_string());
    }

    let len = traces.len();
    let resolved = if index < 0 {
        index + len as isize
    } else {
        index
    };
    if resolved < 0 || resolved >= len as isize {
        return Err(RastroError::TraceIndexOutOfRange { index, len });
    }
    let at = resolved as usize;
    let trace = &traces[at];

    // Stack diffing starts at the third record: the first two always
    // show their full context.
    let mut common_length = 0;
    let relevant = if at > 1 {
        let prev = &traces[at - 1];
        for (current, previous) in trace.context.iter().zip(&prev.context) {
            if current.same_call_site(previous) {
                common_length += 1;
            } else {
                break;
            }
        }
        if common_length == trace.context.len() && common_length > 0 {
            // Keep at least one frame to show the operator's context
            common_length -= 1;
        }
        &trace.context[common_length..]
    } else {
        &trace.context[..]
    };

    let mut lines = Vec::with_capacity(relevant.len());
    for (i, frame) in relevant.iter().enumerate() {
        let marker = if i == relevant.len() - 1 {
            format!("{};", trace.op)
        } else {
            DESCENDS.to_string()
        };
        lines.push(format!(
            "{}{}  # {}:{} in {}: {}",
            "| ".repeat(i + common_length),
            truncate_snippet(&frame.snippet),
            frame.file,
            frame.line,
            frame.function,
            marker,
        ));
    }
    Ok(lines.join("\n"))
}

/// Truncate a snippet to its first 40 characters plus a continuation mark
fn truncate_snippet(snippet: &str) -> String {
    if snippet.chars().count() > SNIPPET_MAX {
        let head: String = snippet.chars().take(SNIPPET_MAX).collect();
        format!("{head} [...]")
    } else {
        snippet.to_string()
    }
}

/// Dim the annotation tail of every rendered line
///
/// A pure transform applied at final string assembly: the portion after
/// each `  # ` separator is wrapped in the ANSI dim sequence, reset
/// before every newline and at the end of the string.
#[must_use]
pub fn colorize(rendered: &str) -> String {
    let dimmed = rendered.replace("  # ", &format!("  {DIM}# "));
    format!("{}{RESET}", dimmed.replace('\n', &format!("{RESET}\n")))
}
