pub mod block;
pub mod span;

pub use block::{Block, Color, DEFAULT_CODE_LANGUAGE, HeadingLevel, TableBlock, TableRow};
pub use span::{Span, visible_text};
