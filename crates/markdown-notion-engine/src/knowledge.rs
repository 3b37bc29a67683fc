//! Glue between written notes and a similarity search service.
//!
//! The service itself (embedding, storage, nearest-neighbour search) is
//! supplied by the caller through [`SimilarityIndex`]. This module decides
//! what gets indexed and when a search result counts as "the same note".

use std::collections::BTreeMap;

use crate::store::BlockId;

/// Distances at or above this are treated as different notes.
pub const DISTANCE_THRESHOLD: f32 = 0.85;
/// Candidates fetched per search.
pub const SEARCH_RESULTS: usize = 5;
/// Bodies shorter than this (after trimming) are not worth indexing.
pub const MIN_BODY_CHARS: usize = 10;
/// Body prefix kept in metadata and in the indexed document.
pub const SNIPPET_CHARS: usize = 3000;
/// Domain value meaning "search everything".
pub const ALL_DOMAINS: &str = "All";

pub type Metadata = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Similarity index unavailable: {0}")]
    Unavailable(String),
    #[error("Similarity index rejected request: {0}")]
    Rejected(String),
}

/// A search hit, nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: BlockId,
    /// Smaller is more similar.
    pub distance: f32,
    pub metadata: Metadata,
}

impl Candidate {
    pub fn title(&self) -> &str {
        self.metadata
            .get("title")
            .map(String::as_str)
            .unwrap_or("Untitled")
    }
}

/// A similarity search service keyed by page id.
pub trait SimilarityIndex {
    fn add(&mut self, id: &BlockId, document: &str, metadata: &Metadata) -> Result<(), IndexError>;

    /// Up to `n` nearest documents, optionally restricted to a domain.
    fn query(
        &mut self,
        text: &str,
        n: usize,
        domain: Option<&str>,
    ) -> Result<Vec<Candidate>, IndexError>;
}

/// A written note, as the index sees it.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub page: BlockId,
    pub title: String,
    pub domain: String,
    pub summary: String,
    pub body: String,
    pub url: Option<String>,
}

impl MemoryEntry {
    fn title(&self) -> &str {
        non_empty(&self.title).unwrap_or("Untitled")
    }

    fn domain(&self) -> &str {
        non_empty(&self.domain).unwrap_or("General")
    }

    fn snippet(&self) -> String {
        self.body.chars().take(SNIPPET_CHARS).collect()
    }

    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("title".into(), self.title().to_string());
        metadata.insert("domain".into(), self.domain().to_string());
        metadata.insert("category".into(), self.domain().to_string());
        metadata.insert("summary".into(), self.summary.clone());
        metadata.insert("content".into(), self.snippet());
        metadata.insert("url".into(), self.url.clone().unwrap_or_default());
        metadata
    }

    /// The text handed to the index for embedding: the title twice (once as
    /// keywords), the summary, and a single-line body snippet.
    pub fn document(&self) -> String {
        let snippet = self.snippet().replace('\n', " ");
        format!(
            "Title: {title}\nKeywords: {title} {domain}\nSummary: {summary}\nSnippet: {snippet}",
            title = self.title(),
            domain = self.domain(),
            summary = self.summary,
        )
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

/// Indexes `entry`. Returns `Ok(false)` when the body is too short to index.
pub fn remember<I>(index: &mut I, entry: &MemoryEntry) -> Result<bool, IndexError>
where
    I: SimilarityIndex + ?Sized,
{
    if entry.body.trim().chars().count() < MIN_BODY_CHARS {
        log::info!("Skipping index for '{}': body too short", entry.title());
        return Ok(false);
    }

    index.add(&entry.page, &entry.document(), &entry.metadata())?;
    log::info!("Indexed '{}' ({})", entry.title(), entry.page);
    Ok(true)
}

/// The first of the nearest candidates closer than [`DISTANCE_THRESHOLD`].
pub fn find_existing<I>(
    index: &mut I,
    query: &str,
    domain: Option<&str>,
) -> Result<Option<Candidate>, IndexError>
where
    I: SimilarityIndex + ?Sized,
{
    if query.trim().chars().count() < 2 {
        return Ok(None);
    }
    let domain = domain.filter(|d| *d != ALL_DOMAINS);

    let candidates = index.query(query, SEARCH_RESULTS, domain)?;
    for (i, candidate) in candidates.iter().enumerate() {
        log::debug!(
            "Candidate #{}: {} (distance {:.4})",
            i + 1,
            candidate.title(),
            candidate.distance
        );
    }

    let hit = candidates
        .into_iter()
        .find(|c| c.distance < DISTANCE_THRESHOLD);
    match &hit {
        Some(c) => log::info!("Matched existing note '{}' ({})", c.title(), c.id),
        None => log::info!("No existing note within distance {DISTANCE_THRESHOLD}"),
    }
    Ok(hit)
}
