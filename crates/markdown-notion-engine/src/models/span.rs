/// One inline-formatted run of text within a block.
///
/// Spans own their text; the markup delimiters (`**`, `` ` ``, `$`, `[..](..)`)
/// are already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Text outside any recognised markup, kept verbatim.
    PlainText { text: String },
    /// `**text**`
    Bold { text: String },
    /// `` `text` ``
    InlineCode { text: String },
    /// `[text](url)`
    Link { text: String, url: String },
    /// `$expression$`
    Equation { expression: String },
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span::PlainText { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span::Bold { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Span::InlineCode { text: text.into() }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Span::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Span::Equation {
            expression: expression.into(),
        }
    }

    /// The text a reader sees once markup is rendered.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self {
            Span::PlainText { text }
            | Span::Bold { text }
            | Span::InlineCode { text }
            | Span::Link { text, .. } => text,
            Span::Equation { expression } => expression,
        }
    }
}

/// Concatenates the visible text of a span sequence.
pub fn visible_text(spans: &[Span]) -> String {
    spans.iter().map(Span::visible_text).collect()
}
