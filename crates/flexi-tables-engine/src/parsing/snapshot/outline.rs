use std::fmt::Write;

use xi_rope::Rope;

use crate::{
    parsing::{
        blocks::{BlockKind, BlockNode},
        rope::slice::preview,
    },
    tables::{RowSlot, TableModel},
};

/// One line per block: kind, byte span and a text preview. Tables also list
/// their rows as `[start+span x rows]` cells, with `^` for continuations.
pub fn outline(rope: &Rope, blocks: &[BlockNode]) -> String {
    let mut out = String::new();
    for b in blocks {
        let kind = match &b.kind {
            BlockKind::Paragraph => "Paragraph".to_string(),
            BlockKind::FencedCode { kind } => format!("FencedCode({kind:?})"),
            BlockKind::Options => "Options".to_string(),
            BlockKind::Table(t) => format!("Table({}, {:?})", t.block_type, t.options.render_mode),
        };
        let _ = writeln!(
            out,
            "{kind} {}..{} {:?}",
            b.span.start,
            b.span.end,
            preview(rope, b.span, 40)
        );
        if let BlockKind::Table(t) = &b.kind {
            table_rows(&mut out, &t.model);
        }
    }
    out
}

fn table_rows(out: &mut String, table: &TableModel) {
    for row in table.rows() {
        let role = if row.is_header_row {
            "head"
        } else if row.is_separator {
            "sep"
        } else {
            "body"
        };
        let cells: Vec<String> = row
            .slots
            .iter()
            .map(|slot| match slot {
                RowSlot::Anchor(cell) => format!(
                    "[{}+{} x{} {:?}]",
                    cell.start_column,
                    cell.col_span,
                    cell.row_span,
                    cell.raw_lines.join("/").trim()
                ),
                RowSlot::Continuation {
                    start_column,
                    col_span,
                    anchor_row,
                } => format!("[{start_column}+{col_span} ^{anchor_row}]"),
            })
            .collect();
        let _ = writeln!(out, "  {role} {}", cells.join(" "));
    }
}
