/// Blockquote block type with owned delimiter constant.
///
/// Only a single `> ` prefix is recognised; nested quotes keep their inner
/// `>` as text.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: &'static str = "> ";

    /// Returns the quoted text if `trimmed` is a blockquote line.
    pub fn strip_prefix(trimmed: &str) -> Option<&str> {
        trimmed.strip_prefix(Self::PREFIX)
    }
}
