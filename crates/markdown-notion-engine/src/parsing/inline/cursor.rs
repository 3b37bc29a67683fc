/// A byte cursor over one line of inline content.
///
/// All delimiters the tokenizer looks for are ASCII, so every position where a
/// construct starts or ends is also a `char` boundary of `s`.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being tokenized.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances while the current byte is not `stop`, returning how many bytes
    /// were skipped. Stops at `stop` or end of input.
    pub fn skip_until(&mut self, stop: u8) -> usize {
        let start = self.i;
        while let Some(b) = self.peek() {
            if b == stop {
                break;
            }
            self.i += 1;
        }
        self.i - start
    }

    /// Text between two byte positions already visited by this cursor.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }
}
