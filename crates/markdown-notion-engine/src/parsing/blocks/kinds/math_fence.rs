/// Display math delimited by `$$`.
///
/// `$$ E=mc^2 $$` on one line is a complete equation; a line starting with
/// `$$` that does not also close opens (or closes) a multi-line block.
pub struct MathFence;

impl MathFence {
    pub const DELIM: &'static str = "$$";

    /// True if the trimmed line starts with `$$`.
    pub fn is_fence(trimmed: &str) -> bool {
        trimmed.starts_with(Self::DELIM)
    }

    /// Expression of a single-line `$$...$$` block.
    ///
    /// The line must be longer than the two delimiters so `$$$$` stays a fence.
    pub fn single_line(trimmed: &str) -> Option<&str> {
        if trimmed.len() <= 2 * Self::DELIM.len() {
            return None;
        }
        let inner = trimmed.strip_prefix(Self::DELIM)?.strip_suffix(Self::DELIM)?;
        Some(inner.trim())
    }
}
