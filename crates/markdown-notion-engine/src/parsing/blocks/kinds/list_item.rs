use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("numbered list pattern is valid"));

pub struct ListItem;

impl ListItem {
    pub const BULLETS: [&'static str; 2] = ["- ", "* "];

    pub fn strip_bullet(trimmed: &str) -> Option<&str> {
        Self::BULLETS
            .iter()
            .find_map(|bullet| trimmed.strip_prefix(bullet))
    }

    /// Strips a leading `N. ` marker (only the first one).
    pub fn strip_number(trimmed: &str) -> Option<&str> {
        NUMBERED_PREFIX.find(trimmed).map(|m| &trimmed[m.end()..])
    }
}
