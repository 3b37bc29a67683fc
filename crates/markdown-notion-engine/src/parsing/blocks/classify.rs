use crate::models::HeadingLevel;

use super::kinds::{BlockQuote, CodeFence, Heading, ListItem, MathFence, PipeTable};

/// Which fence delimiter, if any, a line starts with.
///
/// Computed independently of [`LineKind`] so an open fence can look for its
/// own closer without caring how the line would classify outside the fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceSig {
    Code,
    Math,
}

/// What a line means when no fence is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// `$$ expr $$` on a single line.
    SingleLineMath { expression: &'a str },
    /// `$$` opening a multi-line equation.
    MathFence,
    /// ```` ```lang ```` opening a code block.
    CodeFence { language: &'a str },
    TableRow { cells: Vec<&'a str> },
    /// `|---|:---:|` and friends; never buffered.
    TableSeparator,
    Heading { level: HeadingLevel, text: &'a str },
    BulletedItem { text: &'a str },
    NumberedItem { text: &'a str },
    Quote { text: &'a str },
    Paragraph { text: &'a str },
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// 0-based line number in the source document.
    pub line_no: usize,
    /// The line as written (without its line terminator).
    pub raw: &'a str,
    /// If the trimmed line starts with a fence delimiter.
    pub fence_sig: Option<FenceSig>,
    pub kind: LineKind<'a>,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`].
    ///
    /// Checks run on the whitespace-trimmed line, in priority order: math,
    /// code fence, table, blank, then the prefix-based kinds.
    pub fn classify<'a>(&self, line_no: usize, raw: &'a str) -> LineClass<'a> {
        let trimmed = raw.trim();

        let fence_sig = if MathFence::is_fence(trimmed) {
            Some(FenceSig::Math)
        } else if CodeFence::is_fence(trimmed) {
            Some(FenceSig::Code)
        } else {
            None
        };

        LineClass {
            line_no,
            raw,
            fence_sig,
            kind: Self::kind(trimmed),
        }
    }

    fn kind(trimmed: &str) -> LineKind<'_> {
        if let Some(expression) = MathFence::single_line(trimmed) {
            return LineKind::SingleLineMath { expression };
        }
        if MathFence::is_fence(trimmed) {
            return LineKind::MathFence;
        }
        if let Some(language) = CodeFence::language(trimmed) {
            return LineKind::CodeFence { language };
        }
        if PipeTable::is_row(trimmed) {
            let cells = PipeTable::cells(trimmed);
            return if PipeTable::is_separator(&cells) {
                LineKind::TableSeparator
            } else {
                LineKind::TableRow { cells }
            };
        }
        if trimmed.is_empty() {
            return LineKind::Blank;
        }
        if let Some((level, text)) = Heading::strip_prefix(trimmed) {
            return LineKind::Heading { level, text };
        }
        if let Some(text) = ListItem::strip_bullet(trimmed) {
            return LineKind::BulletedItem { text };
        }
        if let Some(text) = ListItem::strip_number(trimmed) {
            return LineKind::NumberedItem { text };
        }
        if let Some(text) = BlockQuote::strip_prefix(trimmed) {
            return LineKind::Quote { text };
        }
        LineKind::Paragraph { text: trimmed }
    }
}
