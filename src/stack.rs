//! Call-context capture
//!
//! Normalizes the raw call stack at the moment of interception into an
//! outermost-first sequence of frame descriptors, dropping frames that
//! belong to the host runtime's own source tree. The resulting order is
//! what stack-diff rendering depends on.

use serde::{Deserialize, Serialize};

/// One call frame as yielded by the host's stack introspection facility
///
/// Frames arrive innermost-first, the order any stack walker yields, and
/// must not include the capture machinery's own frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Source file path
    pub file: String,
    /// 1-based line number of the call site
    pub line: u32,
    /// Enclosing function name
    pub function: String,
    /// Source text of that line, when available
    pub source_line: Option<String>,
}

/// Call-stack introspection facility supplied by the host runtime
///
/// Must yield the currently active call frames with file path, line
/// number, function name, and best-effort one-line source text.
pub trait StackProvider {
    /// Currently active frames, innermost-first, excluding the capture
    /// machinery itself
    fn capture(&self) -> Vec<RawFrame>;
}

/// Normalized record of one call-stack position
///
/// Only `file` and `line` participate in stack diffing; `function` and
/// `snippet` are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Source file path
    pub file: String,
    /// 1-based line number
    pub line: u32,
    /// Enclosing function name
    pub function: String,
    /// Trimmed single source line; empty when unavailable
    pub snippet: String,
}

impl FrameDescriptor {
    /// Whether two frames refer to the same call site (file and line)
    #[must_use]
    pub fn same_call_site(&self, other: &Self) -> bool {
        self.file == other.file && self.line == other.line
    }
}

/// Normalize a raw stack into outermost-first frame descriptors
///
/// Reverses the walker's innermost-first order, drops every frame whose
/// file path contains any of `runtime_markers`, and trims source
/// snippets of surrounding whitespace.
#[must_use]
pub fn capture_context(raw: Vec<RawFrame>, runtime_markers: &[String]) -> Vec<FrameDescriptor> {
    raw.into_iter()
        .rev()
        .filter(|frame| {
            !runtime_markers
                .iter()
                .any(|marker| frame.file.contains(marker.as_str()))
        })
        .map(|frame| {
            let snippet = frame
                .source_line
                .as_deref()
                .map_or_else(String::new, |line| line.trim().to_string());
            FrameDescriptor {
                file: frame.file,
                line: frame.line,
                function: frame.function,
                snippet,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(file: &str, line: u32, function: &str, source: Option<&str>) -> RawFrame {
        RawFrame {
            file: file.to_string(),
            line,
            function: function.to_string(),
            source_line: source.map(ToString::to_string),
        }
    }

    #[test]
    fn test_order_reversed_to_outermost_first() {
        let frames = vec![
            raw("inner.rs", 3, "leaf", Some("leaf()")),
            raw("mid.rs", 2, "step", Some("step()")),
            raw("outer.rs", 1, "main", Some("main()")),
        ];
        let context = capture_context(frames, &[]);
        let files: Vec<&str> = context.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files, ["outer.rs", "mid.rs", "inner.rs"]);
    }

    #[test]
    fn test_runtime_internal_frames_dropped() {
        let frames = vec![
            raw("src/dispatch/hook.rs", 88, "dispatch", None),
            raw("/host/runtime/ops/add.rs", 10, "add", None),
            raw("model.rs", 5, "forward", Some("x.add(&y)")),
        ];
        let markers = vec!["/host/runtime/".to_string(), "dispatch/hook".to_string()];
        let context = capture_context(frames, &markers);
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].file, "model.rs");
    }

    #[test]
    fn test_snippet_trimmed_and_defaulted() {
        let frames = vec![
            raw("a.rs", 1, "f", Some("   let y = g(x);   ")),
            raw("b.rs", 2, "g", None),
        ];
        let context = capture_context(frames, &[]);
        assert_eq!(context[0].snippet, "");
        assert_eq!(context[1].snippet, "let y = g(x);");
    }

    #[test]
    fn test_same_call_site_ignores_display_fields() {
        let a = FrameDescriptor {
            file: "m.rs".to_string(),
            line: 7,
            function: "f".to_string(),
            snippet: "f()".to_string(),
        };
        let b = FrameDescriptor {
            file: "m.rs".to_string(),
            line: 7,
            function: "renamed".to_string(),
            snippet: "different text".to_string(),
        };
        assert!(a.same_call_site(&b));

        let c = FrameDescriptor { line: 8, ..b };
        assert!(!a.same_call_site(&c));
    }
}
