use crate::models::DEFAULT_CODE_LANGUAGE;

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// True if the trimmed line opens or closes a code fence.
    pub fn is_fence(trimmed: &str) -> bool {
        trimmed.starts_with(Self::BACKTICKS)
    }

    /// Language tag of an opening fence line, defaulting to `plain text`.
    pub fn language(trimmed: &str) -> Option<&str> {
        let info = trimmed.strip_prefix(Self::BACKTICKS)?.trim();
        Some(if info.is_empty() {
            DEFAULT_CODE_LANGUAGE
        } else {
            info
        })
    }
}
