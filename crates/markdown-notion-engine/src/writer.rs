//! Batched writes of an ordered block list.
//!
//! The store accepts at most [`MAX_BATCH`] children per request, so a block
//! list is cut into consecutive order-preserving chunks. No block is split and
//! nothing is retried; a failed batch leaves earlier batches in place.

use crate::models::Block;
use crate::store::{BlockId, DocumentStore, PageProperties, StoreError};

/// Most children the store accepts in one request.
pub const MAX_BATCH: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to create page: {source}")]
    Create {
        #[source]
        source: StoreError,
    },
    #[error("Failed to append batch {} of {batches} ({written} blocks already written): {source}", .batch + 1)]
    Append {
        /// 0-based index of the failed batch.
        batch: usize,
        batches: usize,
        written: usize,
        #[source]
        source: StoreError,
    },
}

/// What a successful write did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// The page the blocks were written to.
    pub page: BlockId,
    /// Number of store calls made, including page creation.
    pub calls: usize,
    pub blocks: usize,
}

/// Number of store calls needed to write `n` blocks.
pub fn batch_count(n: usize) -> usize {
    n.div_ceil(MAX_BATCH)
}

/// Creates a page under `parent` with `children`, sending the first batch
/// with the create request and appending the rest.
pub fn create<S>(
    store: &mut S,
    parent: &str,
    properties: &PageProperties,
    children: &[Block],
) -> Result<WriteReport, WriteError>
where
    S: DocumentStore + ?Sized,
{
    let (first, rest) = children.split_at(children.len().min(MAX_BATCH));

    let page = store
        .create_page(parent, properties, first)
        .map_err(|source| {
            log::warn!("Failed to create page '{}': {source}", properties.title);
            WriteError::Create { source }
        })?;
    log::info!(
        "Created page '{}' ({page}) with {} blocks",
        properties.title,
        first.len()
    );

    let batches = 1 + batch_count(rest.len());
    let calls = 1 + append_batches(store, &page, rest, first.len(), 1, batches)?;

    Ok(WriteReport {
        page,
        calls,
        blocks: children.len(),
    })
}

/// Appends `children` to `page` in batches.
pub fn append<S>(store: &mut S, page: &BlockId, children: &[Block]) -> Result<WriteReport, WriteError>
where
    S: DocumentStore + ?Sized,
{
    let batches = batch_count(children.len());
    let calls = append_batches(store, page, children, 0, 0, batches)?;

    Ok(WriteReport {
        page: page.clone(),
        calls,
        blocks: children.len(),
    })
}

/// Sends `children` in chunks, numbering batches from `first_batch` and
/// counting `written` blocks already on the page. Returns the calls made.
fn append_batches<S>(
    store: &mut S,
    page: &BlockId,
    children: &[Block],
    mut written: usize,
    first_batch: usize,
    batches: usize,
) -> Result<usize, WriteError>
where
    S: DocumentStore + ?Sized,
{
    let mut calls = 0;
    for (i, chunk) in children.chunks(MAX_BATCH).enumerate() {
        let batch = first_batch + i;
        if let Err(source) = store.append_children(page, chunk) {
            log::warn!("Batch {}/{batches} for {page} failed: {source}", batch + 1);
            return Err(WriteError::Append {
                batch,
                batches,
                written,
                source,
            });
        }
        written += chunk.len();
        calls += 1;
        log::info!(
            "Uploaded batch {}/{batches} ({} blocks) to {page}",
            batch + 1,
            chunk.len()
        );
    }
    Ok(calls)
}
