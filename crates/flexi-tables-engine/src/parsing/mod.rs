pub mod blocks;
pub mod rope;
pub mod snapshot;

use xi_rope::Rope;

use crate::tables::TablesExtension;
use blocks::{BlockBuilder, BlockKind, BlockNode, BlockRegistry, TableBlock};
use rope::lines_with_spans;

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

impl ParsedDoc {
    /// The tables of the document, in order.
    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.blocks.iter().filter_map(|b| match &b.kind {
            BlockKind::Table(t) => Some(t),
            _ => None,
        })
    }
}

pub fn parse_document(
    rope: &Rope,
    registry: &BlockRegistry,
    extension: &TablesExtension,
) -> ParsedDoc {
    let mut builder = BlockBuilder::new(registry, extension);

    for lr in lines_with_spans(rope) {
        builder.push(lr);
    }

    ParsedDoc {
        blocks: builder.finish(),
    }
}
