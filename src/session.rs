//! Search session over a segmented document
//!
//! A [`Session`] owns the current chapter sequence. Loading a document builds a
//! fresh, immutable sequence and swaps it in as a whole; searches work on a
//! snapshot, so a reload never disturbs a search already in progress.
//!
//! # Example
//!
//! ```
//! use chapgrep::{SearchOptions, Session};
//!
//! let session = Session::new();
//! session.load_text("Chapter1 Intro\nHello world. Hello there.\nChapter2 Next\nGoodbye world.");
//!
//! let report = session.search("Hello", &SearchOptions::default())?;
//! assert_eq!(report.total_occurrences, 2);
//! assert_eq!(report.hits[0].chapter_title, "第1章-Intro");
//! assert_eq!(report.hits[1].offset, 13);
//! # Ok::<(), chapgrep::SearchError>(())
//! ```

use parking_lot::RwLock;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::boyer_moore::search_chars;
use crate::chapter::{segment, trim_text, Chapter};
use crate::context::{CharBoundaries, Highlight, Highlighter, DEFAULT_CONTEXT_RADIUS};
use crate::error::{Result, SearchError};
use crate::file_reader;

/// Options controlling a [`Session::search`] call.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    context_radius: usize,
    highlight: Highlight,
    case_insensitive_highlight: bool,
    parallel: bool,
    max_hits: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            highlight: Highlight::default(),
            case_insensitive_highlight: true,
            parallel: false,
            max_hits: None,
        }
    }
}

impl SearchOptions {
    /// Default options: 50 characters of context, `<strong>` markers,
    /// case-insensitive highlighting, sequential search, no hit limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters of context on each side of a match.
    pub fn context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    /// How the keyword is marked in snippets.
    pub fn highlight(mut self, style: Highlight) -> Self {
        self.highlight = style;
        self
    }

    /// Whether highlighting ignores case.
    pub fn case_insensitive_highlight(mut self, enabled: bool) -> Self {
        self.case_insensitive_highlight = enabled;
        self
    }

    /// Search chapters on the rayon thread pool.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Cap the number of hits kept in the report. Occurrences past the cap
    /// still count towards the total.
    pub fn max_hits(mut self, limit: Option<usize>) -> Self {
        self.max_hits = limit;
        self
    }

    /// Returns true if the search runs in parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

/// One keyword occurrence with its display context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Title of the chapter containing the match
    pub chapter_title: String,
    /// Index of that chapter in the session
    pub chapter_index: usize,
    /// Character offset of the match in the chapter content
    pub offset: usize,
    /// Context window around the match, keyword highlighted
    pub snippet: String,
}

/// Aggregated result of a session search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Keyword that was searched for (trimmed)
    pub keyword: String,
    /// Number of occurrences over all chapters
    pub total_occurrences: usize,
    /// Chapters that were scanned
    pub chapters_searched: usize,
    /// Chapters skipped because they had no content
    pub chapters_skipped: usize,
    /// Chapters with at least one occurrence
    pub chapters_matched: usize,
    /// Hits in chapter order, then offset order
    pub hits: Vec<SearchHit>,
}

impl SearchReport {
    /// Returns true if at least one occurrence was found.
    pub fn found(&self) -> bool {
        self.total_occurrences > 0
    }
}

enum ChapterOutcome {
    Skipped,
    Searched { occurrences: usize, hits: Vec<SearchHit> },
}

/// Owner of the chapter sequence that searches run against
#[derive(Debug)]
pub struct Session {
    chapters: RwLock<Arc<[Chapter]>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with no chapters.
    pub fn new() -> Self {
        Self {
            chapters: RwLock::new(Arc::from(Vec::<Chapter>::new())),
        }
    }

    /// Creates a session and loads `raw_text` into it.
    pub fn from_text(raw_text: &str) -> Self {
        let session = Self::new();
        session.load_text(raw_text);
        session
    }

    /// Segments `raw_text` and replaces the current chapters with the result.
    ///
    /// Returns the number of chapters loaded.
    pub fn load_text(&self, raw_text: &str) -> usize {
        let chapters: Arc<[Chapter]> = Arc::from(segment(raw_text));
        let count = chapters.len();
        *self.chapters.write() = chapters;
        tracing::info!("Initialization succeeded: {} chapters", count);
        count
    }

    /// Reads the document at `path` (see [`file_reader::read_source`]) and
    /// loads it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::SourceUnavailable`] if the source cannot be
    /// read. The current chapters are left untouched in that case.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        match file_reader::read_source(path) {
            Ok(text) => Ok(self.load_text(&text)),
            Err(e) => {
                tracing::error!("Error during initialization: {}", e);
                Err(e)
            }
        }
    }

    /// Snapshot of the current chapter sequence.
    pub fn chapters(&self) -> Arc<[Chapter]> {
        self.chapters.read().clone()
    }

    /// Number of chapters currently loaded.
    pub fn len(&self) -> usize {
        self.chapters.read().len()
    }

    /// Returns true if no chapters are loaded.
    pub fn is_empty(&self) -> bool {
        self.chapters.read().is_empty()
    }

    /// Finds every occurrence of `keyword` across all chapters.
    ///
    /// The keyword is trimmed first. Chapters with empty content are skipped
    /// with a warning; the remaining chapters are still searched. An empty
    /// session produces an empty report.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyKeyword`] for an empty or whitespace-only
    /// keyword.
    pub fn search(&self, keyword: &str, options: &SearchOptions) -> Result<SearchReport> {
        let keyword = trim_text(keyword);
        if keyword.is_empty() {
            return Err(SearchError::EmptyKeyword);
        }

        let chapters = self.chapters();
        let pattern: Vec<char> = keyword.chars().collect();
        let marker = Highlighter::new(
            keyword,
            &options.highlight,
            options.case_insensitive_highlight,
        );

        let outcomes: Vec<ChapterOutcome> = if options.parallel {
            chapters
                .par_iter()
                .map(|chapter| search_chapter(chapter, &pattern, &marker, options))
                .collect()
        } else {
            chapters
                .iter()
                .map(|chapter| search_chapter(chapter, &pattern, &marker, options))
                .collect()
        };

        let mut report = SearchReport {
            keyword: keyword.to_string(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                ChapterOutcome::Skipped => report.chapters_skipped += 1,
                ChapterOutcome::Searched { occurrences, hits } => {
                    report.chapters_searched += 1;
                    if occurrences > 0 {
                        report.chapters_matched += 1;
                    }
                    report.total_occurrences += occurrences;
                    report.hits.extend(hits);
                }
            }
        }
        if let Some(limit) = options.max_hits {
            report.hits.truncate(limit);
        }

        tracing::debug!(
            "Search for {:?}: {} occurrences in {} chapters ({} skipped)",
            report.keyword,
            report.total_occurrences,
            report.chapters_searched,
            report.chapters_skipped
        );

        Ok(report)
    }
}

fn search_chapter(
    chapter: &Chapter,
    pattern: &[char],
    marker: &Highlighter,
    options: &SearchOptions,
) -> ChapterOutcome {
    if chapter.content().is_empty() {
        tracing::warn!("Chapter {} is missing content.", chapter.title());
        return ChapterOutcome::Skipped;
    }

    let text: Vec<char> = chapter.content().chars().collect();
    let offsets = search_chars(&text, pattern);
    let index = CharBoundaries::new(chapter.content());

    let hits = offsets
        .iter()
        .map(|&offset| SearchHit {
            chapter_title: chapter.title().to_string(),
            chapter_index: chapter.index(),
            offset,
            snippet: marker.apply(index.snippet(offset, pattern.len(), options.context_radius)),
        })
        .collect();

    ChapterOutcome::Searched {
        occurrences: offsets.len(),
        hits,
    }
}
