use crate::{
    models::{Block, TableBlock, TableRow},
    parsing::inline::tokenize,
};

/// Turns buffered raw table rows into one table block.
///
/// Width is the longest row; shorter rows are padded at the end with empty
/// cells. Every cell runs through the inline tokenizer. The first row is
/// always declared a header. Returns `None` for no rows.
pub fn normalize<S: AsRef<str>>(rows: &[Vec<S>]) -> Option<Block> {
    let rows = rows
        .iter()
        .map(|row| TableRow {
            cells: row.iter().map(|cell| tokenize(cell.as_ref())).collect(),
        })
        .collect();
    TableBlock::new(rows, true).map(Block::Table)
}
