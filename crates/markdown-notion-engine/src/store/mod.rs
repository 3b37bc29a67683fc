//! # Document Store
//!
//! The remote system of record, seen through the four calls the write
//! protocols need. Implementations are passed in by the caller; the engine
//! never builds a client of its own.
//!
//! - **`MemoryStore`**: in-process store with a call log and failure injection
//! - **`crate::notion::NotionClient`**: the Notion REST API
//!
//! Calls are individually atomic; there is no multi-call transaction.

pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Block;

pub use memory::{MemoryStore, StoreCall, StoredPage};

/// Opaque identifier assigned by the store to a page or block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Properties sent with a page-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProperties {
    pub title: String,
    /// Classification tags (multi-select).
    pub tags: Vec<String>,
    /// The page's `Type` select value.
    pub kind: String,
    /// Where the note came from, if anywhere.
    pub url: Option<String>,
}

impl PageProperties {
    pub const ARTICLE: &'static str = "Article";

    pub fn article(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: vec![],
            kind: Self::ARTICLE.to_string(),
            url: None,
        }
    }
}

/// An existing child block as reported by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteChild {
    pub id: BlockId,
    /// The store's type tag, e.g. `paragraph` or `code`.
    pub type_name: String,
    /// Concatenated plain text of the block's rich text, if it has any.
    pub plain_text: String,
}

/// One page of a child listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildPage {
    pub children: Vec<RemoteChild>,
    /// Pass back to `list_children` for the next page; `None` when done.
    pub next_cursor: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store rejected request ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Failures a retry of the same call cannot fix (bad credentials, store
    /// unreachable).
    pub fn is_fatal(&self) -> bool {
        match self {
            StoreError::Http(e) => e.is_connect() || e.is_builder(),
            StoreError::Unauthorized(_) => true,
            StoreError::NotFound(_) | StoreError::Api { .. } | StoreError::Decode(_) => false,
        }
    }
}

/// The remote document store.
pub trait DocumentStore {
    /// Creates a page under `parent` with its first batch of children.
    fn create_page(
        &mut self,
        parent: &str,
        properties: &PageProperties,
        children: &[Block],
    ) -> Result<BlockId, StoreError>;

    /// Appends children after the existing children of `id`.
    fn append_children(&mut self, id: &BlockId, children: &[Block]) -> Result<(), StoreError>;

    /// Lists one page of the children of `id`, starting at `cursor`.
    fn list_children(&mut self, id: &BlockId, cursor: Option<&str>)
    -> Result<ChildPage, StoreError>;

    /// Deletes a single block.
    fn delete_block(&mut self, id: &BlockId) -> Result<(), StoreError>;
}
