/// Inline math `$expression$`.
///
/// Matching is non-greedy: the expression ends at the next `$`, and an empty
/// expression (`$$`) never matches.
pub struct InlineMath;

impl InlineMath {
    pub const DOLLAR: u8 = b'$';
}
