use std::collections::BTreeMap;

use uuid::Uuid;

use crate::models::{Block, visible_text};

use super::{BlockId, ChildPage, DocumentStore, PageProperties, RemoteChild, StoreError};

/// One call made against a [`MemoryStore`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Create { parent: String, blocks: usize },
    Append { page: BlockId, blocks: usize },
    List { page: BlockId, cursor: Option<String> },
    Delete { block: BlockId },
}

/// A page held by the [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct StoredPage {
    pub parent: String,
    pub properties: PageProperties,
    pub children: Vec<(BlockId, Block)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CallKind {
    Create,
    Append,
    List,
    Delete,
}

impl CallKind {
    fn name(self) -> &'static str {
        match self {
            CallKind::Create => "create",
            CallKind::Append => "append",
            CallKind::List => "list",
            CallKind::Delete => "delete",
        }
    }
}

/// In-process [`DocumentStore`].
///
/// Records every call, pages listings with a configurable page size, and can
/// be told to fail the n-th call of a given kind.
#[derive(Debug)]
pub struct MemoryStore {
    pages: BTreeMap<BlockId, StoredPage>,
    calls: Vec<StoreCall>,
    page_size: usize,
    fail_at: Option<(CallKind, usize)>,
    seen: BTreeMap<CallKind, usize>,
}

impl MemoryStore {
    /// Listing page size used by the Notion API.
    pub const DEFAULT_PAGE_SIZE: usize = 100;

    pub fn new() -> Self {
        Self {
            pages: BTreeMap::new(),
            calls: vec![],
            page_size: Self::DEFAULT_PAGE_SIZE,
            fail_at: None,
            seen: BTreeMap::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Seeds a page with existing children without logging a call.
    pub fn insert_page(&mut self, parent: &str, properties: PageProperties, children: Vec<Block>) -> BlockId {
        let id = Self::new_id();
        let children = children.into_iter().map(|b| (Self::new_id(), b)).collect();
        self.pages.insert(
            id.clone(),
            StoredPage {
                parent: parent.to_string(),
                properties,
                children,
            },
        );
        id
    }

    /// Fails the `n`-th (0-based) `create_page` call.
    pub fn fail_nth_create(mut self, n: usize) -> Self {
        self.fail_at = Some((CallKind::Create, n));
        self
    }

    /// Fails the `n`-th (0-based) `append_children` call.
    pub fn fail_nth_append(mut self, n: usize) -> Self {
        self.fail_at = Some((CallKind::Append, n));
        self
    }

    /// Fails the `n`-th (0-based) `list_children` call.
    pub fn fail_nth_list(mut self, n: usize) -> Self {
        self.fail_at = Some((CallKind::List, n));
        self
    }

    /// Fails the `n`-th (0-based) `delete_block` call.
    pub fn fail_nth_delete(mut self, n: usize) -> Self {
        self.fail_at = Some((CallKind::Delete, n));
        self
    }

    pub fn calls(&self) -> &[StoreCall] {
        &self.calls
    }

    pub fn page(&self, id: &BlockId) -> Option<&StoredPage> {
        self.pages.get(id)
    }

    /// Children of a page in order, without their ids.
    pub fn blocks(&self, id: &BlockId) -> Vec<Block> {
        self.pages
            .get(id)
            .map(|p| p.children.iter().map(|(_, b)| b.clone()).collect())
            .unwrap_or_default()
    }

    fn new_id() -> BlockId {
        BlockId::new(Uuid::new_v4().to_string())
    }

    fn check(&mut self, kind: CallKind) -> Result<(), StoreError> {
        let count = self.seen.entry(kind).or_insert(0);
        let n = *count;
        *count += 1;
        match self.fail_at {
            Some((k, at)) if k == kind && at == n => Err(StoreError::Api {
                status: 500,
                code: "internal_server_error".into(),
                message: format!("injected failure on {} #{n}", kind.name()),
            }),
            _ => Ok(()),
        }
    }

    fn page_mut(&mut self, id: &BlockId) -> Result<&mut StoredPage, StoreError> {
        self.pages
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn create_page(
        &mut self,
        parent: &str,
        properties: &PageProperties,
        children: &[Block],
    ) -> Result<BlockId, StoreError> {
        self.calls.push(StoreCall::Create {
            parent: parent.to_string(),
            blocks: children.len(),
        });
        self.check(CallKind::Create)?;
        Ok(self.insert_page(parent, properties.clone(), children.to_vec()))
    }

    fn append_children(&mut self, id: &BlockId, children: &[Block]) -> Result<(), StoreError> {
        self.calls.push(StoreCall::Append {
            page: id.clone(),
            blocks: children.len(),
        });
        self.check(CallKind::Append)?;
        let page = self.page_mut(id)?;
        page.children
            .extend(children.iter().map(|b| (Self::new_id(), b.clone())));
        Ok(())
    }

    fn list_children(
        &mut self,
        id: &BlockId,
        cursor: Option<&str>,
    ) -> Result<ChildPage, StoreError> {
        self.calls.push(StoreCall::List {
            page: id.clone(),
            cursor: cursor.map(str::to_string),
        });
        self.check(CallKind::List)?;

        let start = match cursor {
            Some(c) => c
                .parse::<usize>()
                .map_err(|_| StoreError::Decode(format!("invalid cursor: {c}")))?,
            None => 0,
        };
        let page_size = self.page_size;
        let page = self.page_mut(id)?;
        let end = (start + page_size).min(page.children.len());
        let children = page.children[start.min(end)..end]
            .iter()
            .map(|(id, block)| RemoteChild {
                id: id.clone(),
                type_name: block.type_name().to_string(),
                plain_text: plain_text(block),
            })
            .collect();
        let next_cursor = (end < page.children.len()).then(|| end.to_string());

        Ok(ChildPage {
            children,
            next_cursor,
        })
    }

    fn delete_block(&mut self, id: &BlockId) -> Result<(), StoreError> {
        self.calls.push(StoreCall::Delete { block: id.clone() });
        self.check(CallKind::Delete)?;
        for page in self.pages.values_mut() {
            if let Some(pos) = page.children.iter().position(|(child, _)| child == id) {
                page.children.remove(pos);
                return Ok(());
            }
        }
        Err(StoreError::NotFound(id.to_string()))
    }
}

/// What a listing reports as a block's plain text.
fn plain_text(block: &Block) -> String {
    match block {
        Block::Code { text, .. } => text.clone(),
        Block::Equation { expression } => expression.clone(),
        other => other.spans().map(visible_text).unwrap_or_default(),
    }
}
