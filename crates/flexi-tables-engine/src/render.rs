//! Whole-document HTML rendering.

use xi_rope::Rope;

use crate::{
    parsing::{
        ParsedDoc,
        blocks::{BlockKind, BlockRegistry},
        parse_document,
        rope::slice_to_string,
    },
    tables::{CellRenderer, PulldownCellRenderer, TablesExtension, render_table},
};

/// Renders a parsed document. Paragraphs and fences go through the cell
/// renderer's block rendering, tables through the table renderer; options
/// blocks render nothing.
pub fn render_document(rope: &Rope, doc: &ParsedDoc, cells: &dyn CellRenderer) -> String {
    let mut out = String::with_capacity(rope.len() * 2);
    for block in &doc.blocks {
        match &block.kind {
            BlockKind::Paragraph | BlockKind::FencedCode { .. } => {
                out.push_str(&cells.render_blocks(&slice_to_string(rope, block.content_span)));
            }
            BlockKind::Options => {}
            BlockKind::Table(table) => {
                render_table(&table.model, &table.options, cells).write_html(&mut out);
            }
        }
    }
    out
}

/// Parses and renders `markdown` with the table types enabled in
/// `extension`.
pub fn render_markdown(markdown: &str, extension: &TablesExtension) -> String {
    let rope = Rope::from(markdown);
    let registry = BlockRegistry::with_tables(extension);
    let doc = parse_document(&rope, &registry, extension);
    render_document(&rope, &doc, &PulldownCellRenderer::default())
}
