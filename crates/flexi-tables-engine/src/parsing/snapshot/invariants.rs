use xi_rope::Rope;

use crate::parsing::blocks::{BlockKind, BlockNode};

/// Validates parser output invariants.
///
/// Asserts that:
/// - All block spans are within rope bounds and in document order
/// - Content spans are contained within their block spans
/// - Every table partitions its columns in every row, with consistent spans
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, blocks: &[BlockNode]) {
    let n = rope.len();
    let mut prev_end = 0usize;
    for b in blocks {
        assert!(
            b.span.start <= b.span.end && b.span.end <= n,
            "block span out of bounds: {:?} (rope len: {})",
            b.span,
            n
        );
        assert!(
            b.span.start >= prev_end,
            "block span {:?} overlaps the previous block ending at {prev_end}",
            b.span
        );
        assert!(
            b.content_span.start >= b.span.start && b.content_span.end <= b.span.end,
            "content span not contained in block span: content {:?}, block {:?}",
            b.content_span,
            b.span
        );
        if let BlockKind::Table(table) = &b.kind {
            if let Err(msg) = table.model.check() {
                panic!("table at {:?} is malformed: {msg}", b.span);
            }
        }
        prev_end = b.span.end;
    }
}
