//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`InlineMath`**: `DOLLAR = b'$'`
//! - **`CodeSpan`**: `TICK = b'\`'`
//! - **`Link`**: `TEXT_OPEN = b'['`, `TEXT_CLOSE_URL_OPEN = b"]("`, `URL_CLOSE = b')'`
//! - **`Strong`**: `DELIM = b"**"`
//!
//! The tokenizer calls these constants; it never hardcodes `**` or `` ` ``.

pub mod code_span;
pub mod inline_math;
pub mod link;
pub mod strong;

pub use code_span::CodeSpan;
pub use inline_math::InlineMath;
pub use link::Link;
pub use strong::Strong;
