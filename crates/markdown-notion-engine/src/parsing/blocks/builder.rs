use std::mem;

use crate::{
    models::{Block, Span},
    parsing::inline::tokenize,
};

use super::{
    classify::{FenceSig, LineClass, LineKind},
    table,
    types::BlockNode,
};

/// Which multi-line construct, if any, is open.
#[derive(Debug)]
enum Mode {
    Normal,
    Code {
        start: usize,
        language: String,
        lines: Vec<String>,
    },
    Math {
        start: usize,
        lines: Vec<String>,
    },
}

/// Table rows waiting for a non-table line.
#[derive(Debug)]
struct PendingTable {
    start: usize,
    rows: Vec<Vec<String>>,
}

/// Line-driven state machine producing [`BlockNode`]s in source order.
///
/// While a code or math fence is open every line is raw: only the matching
/// closer is recognised and nothing is emitted until it arrives. Table rows
/// are buffered and flushed before anything else is emitted.
pub struct BlockBuilder {
    mode: Mode,
    table: Option<PendingTable>,
    out: Vec<BlockNode>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            table: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass<'_>) {
        match &mut self.mode {
            Mode::Code { lines, .. } => {
                if c.fence_sig == Some(FenceSig::Code) {
                    self.flush_code();
                } else {
                    lines.push(c.raw.to_string());
                }
                return;
            }
            Mode::Math { lines, .. } => {
                if c.fence_sig == Some(FenceSig::Math) {
                    self.flush_math();
                    if let LineKind::SingleLineMath { expression } = &c.kind {
                        self.emit(c.line_no, Block::equation(*expression));
                    }
                } else {
                    lines.push(c.raw.to_string());
                }
                return;
            }
            Mode::Normal => {}
        }

        match &c.kind {
            LineKind::TableRow { cells } => {
                self.table
                    .get_or_insert_with(|| PendingTable {
                        start: c.line_no,
                        rows: vec![],
                    })
                    .rows
                    .push(cells.iter().map(|cell| cell.to_string()).collect());
            }
            // Separators are dropped without closing the table.
            LineKind::TableSeparator => {}
            LineKind::Blank => self.flush_table(),
            LineKind::SingleLineMath { expression } => {
                self.flush_table();
                self.emit(c.line_no, Block::equation(*expression));
            }
            LineKind::MathFence => {
                self.flush_table();
                self.mode = Mode::Math {
                    start: c.line_no,
                    lines: vec![],
                };
            }
            LineKind::CodeFence { language } => {
                self.flush_table();
                self.mode = Mode::Code {
                    start: c.line_no,
                    language: language.to_string(),
                    lines: vec![],
                };
            }
            LineKind::Heading { level, text } => {
                self.flush_table();
                self.emit(c.line_no, Block::heading(*level, tokenize(text)));
            }
            LineKind::BulletedItem { text } => {
                self.flush_table();
                self.emit_text(c.line_no, text, |spans| Block::BulletedItem { spans });
            }
            LineKind::NumberedItem { text } => {
                self.flush_table();
                self.emit_text(c.line_no, text, |spans| Block::NumberedItem { spans });
            }
            LineKind::Quote { text } => {
                self.flush_table();
                self.emit_text(c.line_no, text, |spans| Block::Quote { spans });
            }
            LineKind::Paragraph { text } => {
                self.flush_table();
                self.emit_text(c.line_no, text, |spans| Block::Paragraph { spans });
            }
        }
    }

    /// End of input: flush table, then an open code block, then an open math
    /// block. Unterminated fences keep whatever lines they gathered.
    pub fn finish(mut self) -> Vec<BlockNode> {
        self.flush_table();
        if let Mode::Code { lines, .. } = &self.mode
            && !lines.is_empty()
        {
            self.flush_code();
        }
        if let Mode::Math { lines, .. } = &self.mode
            && !lines.is_empty()
        {
            self.flush_math();
        }
        self.out
    }

    fn emit(&mut self, line: usize, block: Block) {
        self.out.push(BlockNode { line, block });
    }

    fn emit_text(&mut self, line: usize, text: &str, make: impl FnOnce(Vec<Span>) -> Block) {
        self.emit(line, make(tokenize(text)));
    }

    fn flush_table(&mut self) {
        if let Some(pending) = self.table.take()
            && let Some(block) = table::normalize(&pending.rows)
        {
            self.emit(pending.start, block);
        }
    }

    fn flush_code(&mut self) {
        let prev = mem::replace(&mut self.mode, Mode::Normal);
        if let Mode::Code {
            start,
            language,
            lines,
        } = prev
        {
            self.emit(start, Block::code(lines.join("\n"), &language));
        } else {
            self.mode = prev;
        }
    }

    fn flush_math(&mut self) {
        let prev = mem::replace(&mut self.mode, Mode::Normal);
        if let Mode::Math { start, lines } = prev {
            self.emit(start, Block::equation(lines.join("\n")));
        } else {
            self.mode = prev;
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
