pub mod knowledge;
pub mod models;
pub mod notes;
pub mod notion;
pub mod parsing;
pub mod replace;
pub mod store;
pub mod writer;

// Re-export key types for easier usage
pub use models::{Block, Color, HeadingLevel, Span, TableBlock, TableRow};
pub use parsing::{markdown_to_blocks, parse_document};
pub use replace::{ReplaceError, ReplaceReport, overwrite, overwrite_markdown};
pub use store::{BlockId, DocumentStore, MemoryStore, PageProperties, StoreError};
pub use writer::{MAX_BATCH, WriteError, WriteReport};
