//! Replacing the whole content of a page.
//!
//! The store has no "replace children" call, so an overwrite is: page through
//! every existing child, delete them one by one, then append the new blocks.
//! Ids are collected in full before the first delete so deletions never
//! disturb the listing cursor.

use crate::models::Block;
use crate::parsing::markdown_to_blocks;
use crate::store::{BlockId, DocumentStore, StoreError};
use crate::writer::{self, WriteError};

#[derive(Debug, thiserror::Error)]
pub enum ReplaceError {
    #[error("Failed to list children: {source}")]
    List {
        #[source]
        source: StoreError,
    },
    #[error("Failed to delete child {index} ({block}): {source}")]
    Delete {
        /// Position of the child in the listing.
        index: usize,
        block: BlockId,
        #[source]
        source: StoreError,
    },
    /// The page was cleared but the new content was not fully written.
    #[error("Page cleared ({deleted} children deleted) but rewrite failed: {source}")]
    Rewrite {
        deleted: usize,
        #[source]
        source: WriteError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceReport {
    pub deleted: usize,
    /// Append calls made for the new content.
    pub batches: usize,
}

/// Every child id of `page`, in listing order.
pub fn child_ids<S>(store: &mut S, page: &BlockId) -> Result<Vec<BlockId>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let mut ids = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let listing = store.list_children(page, cursor.as_deref())?;
        log::debug!("Listed {} children of {page}", listing.children.len());
        ids.extend(listing.children.into_iter().map(|c| c.id));
        match listing.next_cursor {
            Some(next) => cursor = Some(next),
            None => return Ok(ids),
        }
    }
}

/// Deletes every child of `page`, returning how many were removed.
pub fn clear<S>(store: &mut S, page: &BlockId) -> Result<usize, ReplaceError>
where
    S: DocumentStore + ?Sized,
{
    let ids = child_ids(store, page).map_err(|source| ReplaceError::List { source })?;

    for (index, id) in ids.iter().enumerate() {
        store.delete_block(id).map_err(|source| {
            log::warn!("Failed to delete block {id}: {source}");
            ReplaceError::Delete {
                index,
                block: id.clone(),
                source,
            }
        })?;
        log::debug!("Deleted block {id}");
    }

    log::info!("Cleared {} children from {page}", ids.len());
    Ok(ids.len())
}

/// Replaces the children of `page` with `blocks`.
pub fn overwrite<S>(store: &mut S, page: &BlockId, blocks: &[Block]) -> Result<ReplaceReport, ReplaceError>
where
    S: DocumentStore + ?Sized,
{
    let deleted = clear(store, page)?;
    let report = writer::append(store, page, blocks)
        .map_err(|source| ReplaceError::Rewrite { deleted, source })?;

    Ok(ReplaceReport {
        deleted,
        batches: report.calls,
    })
}

/// Replaces the children of `page` with the blocks parsed from `markdown`.
pub fn overwrite_markdown<S>(
    store: &mut S,
    page: &BlockId,
    markdown: &str,
) -> Result<ReplaceReport, ReplaceError>
where
    S: DocumentStore + ?Sized,
{
    overwrite(store, page, &markdown_to_blocks(markdown))
}
