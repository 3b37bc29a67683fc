//! # Inline Parsing
//!
//! Cursor-based tokenizer that turns one line of text into rich-text spans.
//!
//! ## Modules
//!
//! - **`kinds`**: Inline-specific types with owned delimiters (InlineMath, CodeSpan, Link, Strong)
//! - **`cursor`**: `Cursor` for byte-by-byte scanning
//! - **`parser`**: `tokenize()` main entry point with `try_parse_*` helpers
//!
//! ## Precedence
//!
//! When several constructs could start at the same position the order is
//! inline math, code span, link, bold. `$a `b` c$` is one equation span.

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::tokenize;
