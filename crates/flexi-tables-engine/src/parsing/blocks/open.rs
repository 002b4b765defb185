use super::{
    classify::LineClass,
    kinds::{FenceSig, OptionsBlock},
    registry::{BlockRegistry, TableBlockType},
};

#[derive(Debug, Clone, Copy)]
pub enum BlockOpen {
    FencedCode { sig: FenceSig },
    Options,
    Table(TableBlockType),
}

/// Detects a block opener on `c`.
///
/// Fences open anywhere, interrupting a paragraph. Options blocks and tables
/// open only at a block start, and only when some table type is registered.
pub fn try_open_leaf(
    c: &LineClass,
    registry: &BlockRegistry,
    at_block_start: bool,
) -> Option<BlockOpen> {
    // Precedence: fence beats everything else.
    if let Some(sig) = c.fence_sig {
        return Some(BlockOpen::FencedCode { sig });
    }
    if !at_block_start || registry.is_empty() {
        return None;
    }
    if OptionsBlock::opens(&c.text) {
        return Some(BlockOpen::Options);
    }
    registry.sniff(&c.text).map(BlockOpen::Table)
}
