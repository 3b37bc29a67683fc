/// Code span inline type with owned delimiter constant.
///
/// The inner text must be non-empty: ``` `` ``` is plain text.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
}
