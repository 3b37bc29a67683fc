use crate::models::HeadingLevel;

pub struct Heading;

impl Heading {
    /// Prefixes in match order. `#### ` folds into level 3.
    const PREFIXES: [(&'static str, HeadingLevel); 4] = [
        ("# ", HeadingLevel::H1),
        ("## ", HeadingLevel::H2),
        ("### ", HeadingLevel::H3),
        ("#### ", HeadingLevel::H3),
    ];

    pub fn strip_prefix(trimmed: &str) -> Option<(HeadingLevel, &str)> {
        Self::PREFIXES
            .iter()
            .find_map(|(prefix, level)| trimmed.strip_prefix(prefix).map(|rest| (*level, rest)))
    }
}
