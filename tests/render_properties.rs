//! Property-based tests for stack-diff rendering
//!
//! Fuzzes trace stores with overlapping call contexts and checks the
//! rendering invariants: idempotence, the common-prefix bound, snippet
//! truncation, and indentation depth.

use proptest::prelude::*;

use rastro::{render, FrameDescriptor, TraceRecord};

// ============================================================================
// Strategies
// ============================================================================

/// Frames drawn from a small pool of call sites so generated contexts
/// share prefixes often.
fn frame_strategy() -> impl Strategy<Value = FrameDescriptor> {
    (0..4u32, 1..5u32, "[a-z]{1,12}").prop_map(|(file, line, snippet)| FrameDescriptor {
        file: format!("file{file}.rs"),
        line,
        function: format!("fn{file}"),
        snippet,
    })
}

fn context_strategy() -> impl Strategy<Value = Vec<FrameDescriptor>> {
    prop::collection::vec(frame_strategy(), 0..5)
}

fn store_strategy() -> impl Strategy<Value = Vec<TraceRecord>> {
    prop::collection::vec(
        context_strategy().prop_map(|context| TraceRecord {
            op: "add(f32[2])".to_string(),
            context,
        }),
        1..6,
    )
}

/// Leading depth markers of a rendered line
fn indent_of(line: &str) -> usize {
    let mut depth = 0;
    let mut rest = line;
    while let Some(stripped) = rest.strip_prefix("| ") {
        depth += 1;
        rest = stripped;
    }
    depth
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn test_render_is_idempotent(store in store_strategy(), index in 0..6isize) {
        let first = render(&store, index);
        let second = render(&store, index);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_indentation_strictly_increases_within_block(store in store_strategy(), index in 0..6isize) {
        if let Ok(block) = render(&store, index) {
            let depths: Vec<usize> = block.lines().map(indent_of).collect();
            for pair in depths.windows(2) {
                prop_assert_eq!(pair[1], pair[0] + 1);
            }
        }
    }

    #[test]
    fn test_deepest_line_always_carries_the_op(store in store_strategy()) {
        // Every valid index renders a block ending in the op call, unless
        // the record's context is empty.
        for index in 0..store.len() {
            let block = render(&store, index as isize).unwrap();
            if store[index].context.is_empty() {
                prop_assert_eq!(block.as_str(), "");
            } else {
                prop_assert!(block.ends_with("add(f32[2]);"));
            }
        }
    }

    #[test]
    fn test_snippet_never_exceeds_truncation_bound(raw in "[ -~]{0,80}") {
        // Descriptors carry trimmed snippets; capture guarantees it.
        let snippet = raw.trim().to_string();
        let record = TraceRecord {
            op: "f()".to_string(),
            context: vec![FrameDescriptor {
                file: "m.rs".to_string(),
                line: 1,
                function: "main".to_string(),
                snippet: snippet.clone(),
            }],
        };
        let block = render(&[record], 0).unwrap();

        let expected = if snippet.chars().count() > 40 {
            // Exactly 40 characters plus the continuation mark
            let head: String = snippet.chars().take(40).collect();
            format!("{head} [...]")
        } else {
            snippet
        };
        let expected_prefix = format!("{}  # ", expected);
        prop_assert!(block.starts_with(&expected_prefix));
    }

    #[test]
    fn test_full_context_at_first_two_indices(store in store_strategy()) {
        for index in [0_usize, 1] {
            if index < store.len() {
                let block = render(&store, index as isize).unwrap();
                prop_assert_eq!(block.lines().count(), store[index].context.len());
            }
        }
    }
}
