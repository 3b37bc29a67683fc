pub mod blocks;
pub mod inline;

#[cfg(test)]
mod tests;

use crate::models::Block;

use blocks::{BlockBuilder, BlockNode, MarkdownLineClassifier};

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

impl ParsedDoc {
    /// Drops source positions, keeping the blocks in order.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks.into_iter().map(|n| n.block).collect()
    }
}

/// Parses a Markdown document into blocks. Never fails: malformed input
/// degrades to the closest structural reading.
pub fn parse_document(markdown: &str) -> ParsedDoc {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new();

    for (line_no, line) in markdown.lines().enumerate() {
        let lc = classifier.classify(line_no, line);
        builder.push(&lc);
    }

    ParsedDoc {
        blocks: builder.finish(),
    }
}

/// Convenience: parse and keep only the blocks.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    parse_document(markdown).into_blocks()
}
