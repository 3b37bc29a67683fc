//! Note-level operations: what a note page looks like when created, updated,
//! rewritten or read back, and the create-or-overwrite flow that keeps the
//! knowledge index in step with the store.

use crate::knowledge::{self, MemoryEntry, SimilarityIndex};
use crate::models::{Block, Color, HeadingLevel, Span};
use crate::parsing::{inline::tokenize, markdown_to_blocks};
use crate::replace::{self, ReplaceError, ReplaceReport};
use crate::store::{BlockId, DocumentStore, PageProperties, StoreError};
use crate::writer::{self, WriteError, WriteReport};

pub const SUMMARY_ICON: &str = "💡";
/// Tag added to every note written through [`manage_note`].
pub const AUTO_TAG: &str = "AI-Auto";
pub const DEFAULT_CATEGORY: &str = "General";

/// Content of a note to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub summary: Option<String>,
    pub markdown_body: String,
    pub tags: Vec<String>,
    pub source_url: Option<String>,
}

impl NoteDraft {
    fn title_or(&self, fallback: &str) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            fallback.to_string()
        } else {
            title.to_string()
        }
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn properties(&self) -> PageProperties {
        PageProperties {
            tags: self.tags.clone(),
            url: self.source_url.clone().filter(|u| !u.is_empty()),
            ..PageProperties::article(self.title_or("Untitled"))
        }
    }

    /// Summary callout (when there is a summary) followed by the parsed body.
    fn page_blocks(&self) -> Vec<Block> {
        let mut blocks: Vec<Block> = self.summary().map(summary_callout).into_iter().collect();
        blocks.extend(markdown_to_blocks(&self.markdown_body));
        blocks
    }
}

pub fn summary_callout(summary: &str) -> Block {
    Block::Callout {
        spans: tokenize(summary),
        icon: SUMMARY_ICON.to_string(),
        color: Some(Color::GrayBackground),
    }
}

/// Creates a note page in `database`.
pub fn create_note<S>(store: &mut S, database: &str, draft: &NoteDraft) -> Result<WriteReport, WriteError>
where
    S: DocumentStore + ?Sized,
{
    let properties = draft.properties();
    log::info!("Creating note '{}'", properties.title);
    writer::create(store, database, &properties, &draft.page_blocks())
}

/// Appends an "Update" section to the end of `page`.
pub fn append_update<S>(store: &mut S, page: &BlockId, draft: &NoteDraft) -> Result<WriteReport, WriteError>
where
    S: DocumentStore + ?Sized,
{
    let mut blocks = vec![
        Block::Divider,
        Block::Heading {
            level: HeadingLevel::H2,
            spans: vec![Span::plain(format!("Update: {}", draft.title_or("Update")))],
            color: Some(Color::BlueBackground),
        },
    ];

    let body = markdown_to_blocks(&draft.markdown_body);
    if body.is_empty() {
        let spans = draft.summary().map(Span::plain).into_iter().collect();
        blocks.push(Block::Paragraph { spans });
    } else {
        blocks.extend(body);
    }

    log::info!("Appending update to {page}");
    writer::append(store, page, &blocks)
}

/// Replaces the content of `page` with the draft.
pub fn overwrite_note<S>(store: &mut S, page: &BlockId, draft: &NoteDraft) -> Result<ReplaceReport, ReplaceError>
where
    S: DocumentStore + ?Sized,
{
    log::info!("Overwriting {page} with '{}'", draft.title_or("Untitled"));
    replace::overwrite(store, page, &draft.page_blocks())
}

/// The first listing page of `page` as plain text, one paragraph per block.
/// Code blocks are fenced; blocks without text are left out.
pub fn page_text<S>(store: &mut S, page: &BlockId) -> Result<String, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let listing = store.list_children(page, None)?;
    let parts: Vec<String> = listing
        .children
        .into_iter()
        .filter_map(|child| match child.type_name.as_str() {
            "code" => Some(format!("```\n{}\n```", child.plain_text)),
            _ if child.plain_text.is_empty() => None,
            _ => Some(child.plain_text),
        })
        .collect();
    Ok(parts.join("\n\n"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    Create,
    Overwrite { page: BlockId },
}

/// A note to write, as produced by the caller's drafting step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRequest {
    pub action: NoteAction,
    pub title: String,
    pub markdown: String,
    pub summary: String,
    pub category: String,
}

impl NoteRequest {
    fn category(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        }
    }

    fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            summary: Some(self.summary.clone()),
            markdown_body: self.markdown.clone(),
            tags: vec![self.category().to_string(), AUTO_TAG.to_string()],
            source_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteOutcome {
    pub page: BlockId,
    pub created: bool,
    /// Whether the note made it into the knowledge index.
    pub indexed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Replace(#[from] ReplaceError),
}

/// Creates or overwrites a note, then records it in the knowledge index.
/// Index failures are logged and do not fail the write.
pub fn manage_note<S, I>(
    store: &mut S,
    index: &mut I,
    database: &str,
    request: &NoteRequest,
) -> Result<NoteOutcome, NoteError>
where
    S: DocumentStore + ?Sized,
    I: SimilarityIndex + ?Sized,
{
    let draft = request.draft();
    let (page, created) = match &request.action {
        NoteAction::Create => (create_note(store, database, &draft)?.page, true),
        NoteAction::Overwrite { page } => {
            overwrite_note(store, page, &draft)?;
            (page.clone(), false)
        }
    };

    let entry = MemoryEntry {
        page: page.clone(),
        title: request.title.clone(),
        domain: request.category().to_string(),
        summary: request.summary.clone(),
        body: request.markdown.clone(),
        url: None,
    };
    let indexed = knowledge::remember(index, &entry).unwrap_or_else(|e| {
        log::warn!("Failed to index note {page}: {e}");
        false
    });

    Ok(NoteOutcome {
        page,
        created,
        indexed,
    })
}
