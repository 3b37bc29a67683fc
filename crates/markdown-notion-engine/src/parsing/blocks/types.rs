use crate::models::Block;

/// A parsed block with the source line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    /// 0-based line of the block's first contributing line.
    pub line: usize,
    pub block: Block,
}
