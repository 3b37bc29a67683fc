use super::span::Span;

/// Language tag used when a code fence does not name one.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// Heading depth. The store has no fourth level; `####` maps to `H3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

/// Block colors the note layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    GrayBackground,
    BlueBackground,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::GrayBackground => "gray_background",
            Color::BlueBackground => "blue_background",
        }
    }
}

/// One structural unit of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        spans: Vec<Span>,
        color: Option<Color>,
    },
    Paragraph {
        spans: Vec<Span>,
    },
    BulletedItem {
        spans: Vec<Span>,
    },
    NumberedItem {
        spans: Vec<Span>,
    },
    Quote {
        spans: Vec<Span>,
    },
    /// Raw multi-line code. `language` is never empty.
    Code {
        text: String,
        language: String,
    },
    Table(TableBlock),
    Equation {
        expression: String,
    },
    Divider,
    Callout {
        spans: Vec<Span>,
        icon: String,
        color: Option<Color>,
    },
}

impl Block {
    pub fn heading(level: HeadingLevel, spans: Vec<Span>) -> Self {
        Block::Heading {
            level,
            spans,
            color: None,
        }
    }

    /// Builds a code block, substituting [`DEFAULT_CODE_LANGUAGE`] for a blank tag.
    pub fn code(text: impl Into<String>, language: &str) -> Self {
        let language = language.trim();
        Block::Code {
            text: text.into(),
            language: if language.is_empty() {
                DEFAULT_CODE_LANGUAGE.to_string()
            } else {
                language.to_string()
            },
        }
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Block::Equation {
            expression: expression.into(),
        }
    }

    /// The block's type tag in the store's vocabulary.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Heading { level, .. } => match level {
                HeadingLevel::H1 => "heading_1",
                HeadingLevel::H2 => "heading_2",
                HeadingLevel::H3 => "heading_3",
            },
            Block::Paragraph { .. } => "paragraph",
            Block::BulletedItem { .. } => "bulleted_list_item",
            Block::NumberedItem { .. } => "numbered_list_item",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::Table(_) => "table",
            Block::Equation { .. } => "equation",
            Block::Divider => "divider",
            Block::Callout { .. } => "callout",
        }
    }

    /// Inline spans for the kinds that carry rich text.
    #[must_use]
    pub fn spans(&self) -> Option<&[Span]> {
        match self {
            Block::Heading { spans, .. }
            | Block::Paragraph { spans }
            | Block::BulletedItem { spans }
            | Block::NumberedItem { spans }
            | Block::Quote { spans }
            | Block::Callout { spans, .. } => Some(spans),
            Block::Code { .. } | Block::Table(_) | Block::Equation { .. } | Block::Divider => None,
        }
    }
}

/// A table whose rows all have exactly `width` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    width: usize,
    has_header: bool,
    rows: Vec<TableRow>,
}

/// One table row: a span sequence per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<Vec<Span>>,
}

impl TableBlock {
    /// Builds a table, padding every row to the widest one.
    ///
    /// Returns `None` when there are no rows or every row is empty.
    pub fn new(rows: Vec<TableRow>, has_header: bool) -> Option<Self> {
        let width = rows.iter().map(|r| r.cells.len()).max()?;
        if width == 0 {
            return None;
        }
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.cells.resize_with(width, Vec::new);
                r
            })
            .collect();
        Some(Self {
            width,
            has_header,
            rows,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }
}
