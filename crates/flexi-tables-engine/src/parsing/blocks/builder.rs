use log::{debug, warn};

use crate::{
    parsing::rope::{lines::LineRef, span::Span},
    tables::{Outcome, Step, TableAssembler, TableModel, TableOptionsOverride, TablesExtension},
};

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    kinds::{BraceScanner, CodeFence, FenceSig, OptionsBlock},
    open::{BlockOpen, try_open_leaf},
    registry::{BlockRegistry, TableBlockType},
    types::{BlockKind, BlockNode, TableBlock},
};

struct OpenTable {
    block: TableBlockType,
    assembler: Box<dyn TableAssembler>,
    /// Block-level options from a preceding options block.
    options: Option<TableOptionsOverride>,
    /// Lines the assembler let go of. They become a paragraph before the
    /// table if it finishes, or are replayed with the rest if it is rejected.
    released: Vec<LineRef>,
    start: usize,
    last_line_end: usize,
}

struct OpenOptions {
    start: usize,
    last_line_end: usize,
    text: String,
    braces: BraceScanner,
}

enum LeafState {
    None,
    Paragraph {
        start: usize,
        last_line_end: usize,
    },
    Fence {
        sig: FenceSig,
        start: usize,
        last_line_end: usize,
    },
    Options(OpenOptions),
    Table(OpenTable),
}

pub struct BlockBuilder<'a> {
    registry: &'a BlockRegistry,
    extension: &'a TablesExtension,
    classifier: MarkdownLineClassifier,
    leaf: LeafState,
    /// Parsed options waiting for the next block.
    pending_options: Option<TableOptionsOverride>,
    out: Vec<BlockNode>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(registry: &'a BlockRegistry, extension: &'a TablesExtension) -> Self {
        Self {
            registry,
            extension,
            classifier: MarkdownLineClassifier,
            leaf: LeafState::None,
            pending_options: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: LineRef) {
        self.feed(line, true);
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        // EOF flush; a rejected table replays its lines, which may leave
        // another leaf open.
        loop {
            match std::mem::replace(&mut self.leaf, LeafState::None) {
                LeafState::None => break,
                LeafState::Paragraph {
                    start,
                    last_line_end,
                } => {
                    self.emit(BlockKind::Paragraph, start, last_line_end);
                    break;
                }
                LeafState::Fence {
                    sig,
                    start,
                    last_line_end,
                } => {
                    // Unterminated fence: emit as fence block anyway
                    self.emit(BlockKind::FencedCode { kind: sig.kind }, start, last_line_end);
                    break;
                }
                LeafState::Options(options) => {
                    warn!("Unterminated table options at byte {}", options.start);
                    self.emit(BlockKind::Paragraph, options.start, options.last_line_end);
                    break;
                }
                LeafState::Table(table) => self.finish_table(table),
            }
        }
        self.drop_pending_options();
        self.out
    }

    fn feed(&mut self, line: LineRef, may_open_table: bool) {
        let c = match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::Table(table) => return self.feed_table(table, line),
            LeafState::Fence { sig, start, .. } => return self.consume_fence_line(sig, start, &line),
            LeafState::Options(options) => {
                let c = self.classifier.classify(&line);
                if !c.is_blank {
                    return self.extend_options(options, &c);
                }
                warn!("Unterminated table options at byte {}", options.start);
                self.emit(BlockKind::Paragraph, options.start, options.last_line_end);
                c
            }
            other => {
                self.leaf = other;
                self.classifier.classify(&line)
            }
        };

        if c.is_blank {
            self.flush_paragraph();
            return;
        }

        let at_block_start = matches!(self.leaf, LeafState::None);
        match try_open_leaf(&c, self.registry, at_block_start && may_open_table) {
            Some(BlockOpen::FencedCode { sig }) => {
                self.flush_paragraph();
                self.drop_pending_options();
                self.leaf = LeafState::Fence {
                    sig,
                    start: c.line.start,
                    last_line_end: c.line.end,
                };
            }
            Some(BlockOpen::Options) => {
                self.drop_pending_options();
                let options = OpenOptions {
                    start: c.line.start,
                    last_line_end: c.line.start,
                    text: String::new(),
                    braces: BraceScanner::default(),
                };
                self.extend_options(options, &c);
            }
            Some(BlockOpen::Table(block)) => {
                debug!("{} table opened at byte {}", block.name, c.line.start);
                let table = OpenTable {
                    block,
                    assembler: (block.open)(self.extension),
                    options: self.pending_options.take(),
                    released: Vec::new(),
                    start: c.line.start,
                    last_line_end: c.line.start,
                };
                self.feed_table(table, line);
            }
            None => self.extend_paragraph(c.line),
        }
    }

    fn feed_table(&mut self, mut table: OpenTable, line: LineRef) {
        let span = line.span;
        match table.assembler.push(line) {
            Step::Consumed => {
                table.last_line_end = span.end;
                self.leaf = LeafState::Table(table);
            }
            Step::Released(lines) => {
                table.released.extend(lines);
                table.start = span.start;
                table.last_line_end = span.end;
                self.leaf = LeafState::Table(table);
            }
            Step::Finished { table: model, rest } => {
                let span = Span {
                    start: table.start,
                    end: table.last_line_end,
                };
                self.emit_released(&table.released);
                self.emit_table(table.block, table.options, span, model);
                self.feed(rest, true);
            }
            Step::Rejected(lines) => {
                debug!(
                    "{} table at byte {} rejected, replaying {} lines",
                    table.block.name,
                    table.start,
                    table.released.len() + lines.len()
                );
                if table.options.is_some() {
                    debug!("Discarding table options of a rejected table");
                }
                let mut replayed = table.released;
                replayed.extend(lines);
                self.replay(replayed);
            }
        }
    }

    fn finish_table(&mut self, table: OpenTable) {
        let OpenTable {
            block,
            assembler,
            options,
            mut released,
            start,
            last_line_end,
        } = table;
        match assembler.finish() {
            Outcome::Table(model) => {
                self.emit_released(&released);
                self.emit_table(block, options, Span { start, end: last_line_end }, model);
            }
            Outcome::Rejected(lines) => {
                released.extend(lines);
                debug!(
                    "{} table at byte {start} rejected at end of document, replaying {} lines",
                    block.name,
                    released.len()
                );
                self.replay(released);
            }
        }
    }

    /// Replays lines of a rejected table. The first line is plain text and
    /// may not reopen a table; the rest go through normal handling.
    fn replay(&mut self, lines: Vec<LineRef>) {
        let mut lines = lines.into_iter();
        if let Some(first) = lines.next() {
            self.feed(first, false);
        }
        for line in lines {
            self.feed(line, true);
        }
    }

    /// Released lines precede a finished table as one paragraph.
    fn emit_released(&mut self, lines: &[LineRef]) {
        if let (Some(first), Some(last)) = (lines.first(), lines.last()) {
            self.emit(BlockKind::Paragraph, first.span.start, last.span.end);
        }
    }

    fn emit_table(
        &mut self,
        block: TableBlockType,
        options: Option<TableOptionsOverride>,
        span: Span,
        model: TableModel,
    ) {
        debug!(
            "{} table finalized at bytes {}..{}",
            block.name, span.start, span.end
        );
        let options = self.extension.options_for(options.as_ref());
        let kind = BlockKind::Table(TableBlock {
            block_type: block.name,
            model,
            options,
        });
        self.emit(kind, span.start, span.end);
    }

    fn extend_options(&mut self, mut options: OpenOptions, c: &LineClass) {
        options.text.push_str(&c.text);
        options.text.push('\n');
        options.braces.scan(&c.text);
        options.last_line_end = c.line.end;
        if !options.braces.is_closed() {
            self.leaf = LeafState::Options(options);
            return;
        }

        match TableOptionsOverride::from_json(OptionsBlock::json(&options.text)) {
            Ok(parsed) => {
                self.emit(BlockKind::Options, options.start, options.last_line_end);
                self.pending_options = Some(parsed);
            }
            Err(e) => {
                warn!("Ignoring table options at byte {}: {e}", options.start);
                self.emit(BlockKind::Paragraph, options.start, options.last_line_end);
            }
        }
    }

    fn drop_pending_options(&mut self) {
        if self.pending_options.take().is_some() {
            debug!("Discarding table options not followed by a table");
        }
    }

    fn consume_fence_line(&mut self, sig: FenceSig, start: usize, line: &LineRef) {
        // Close if this line is a matching fence.
        if CodeFence::closes(sig, line.content()) {
            self.emit(BlockKind::FencedCode { kind: sig.kind }, start, line.span.end);
        } else {
            self.leaf = LeafState::Fence {
                sig,
                start,
                last_line_end: line.span.end,
            };
        }
    }

    fn extend_paragraph(&mut self, line: Span) {
        match self.leaf {
            LeafState::Paragraph { start, .. } => {
                self.leaf = LeafState::Paragraph {
                    start,
                    last_line_end: line.end,
                };
            }
            _ => {
                self.drop_pending_options();
                self.leaf = LeafState::Paragraph {
                    start: line.start,
                    last_line_end: line.end,
                };
            }
        }
    }

    fn flush_paragraph(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Paragraph {
            start,
            last_line_end,
        } = prev
        {
            self.emit(BlockKind::Paragraph, start, last_line_end);
        } else {
            self.leaf = prev;
        }
    }

    fn emit(&mut self, kind: BlockKind, start: usize, end: usize) {
        let span = Span { start, end };
        self.out.push(BlockNode {
            kind,
            span,
            content_span: span,
        });
    }
}
