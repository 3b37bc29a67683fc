//! # Block Parsing
//!
//! Two-phase, single forward pass over the document's lines.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (fence signature, what the line means outside a fence)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` tracks the open
//!    construct (code fence, math fence) and a pending table buffer, and emits
//!    `BlockNode`s in source order
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode` (a block plus the line it started on)
//! - **`kinds`**: Block-specific types with owned delimiters (CodeFence, MathFence, PipeTable, ...)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`table`**: the table normalizer (width, padding, header flag)
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Fenced code and math are raw zones: no classification inside
//! - Nothing is emitted while a fence is open
//! - A pending table is flushed before any later block is emitted
//! - Every table row has exactly `width` cells

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod table;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{FenceSig, LineClass, LineKind, MarkdownLineClassifier};
pub use types::BlockNode;
