//! chapgrep - Keyword Search Across Chapter-Segmented Novels
//!
//! chapgrep splits a long novel into chapters at `ChapterN Name` markers and
//! finds every occurrence of a keyword in every chapter, returning each hit with
//! its chapter title and a highlighted context snippet.
//!
//! # Quick Start
//!
//! ```rust
//! use chapgrep::{SearchOptions, Session};
//!
//! let session = Session::new();
//! session.load_text(
//!     "Chapter1 Intro\nHello world. Hello there.\nChapter2 Next\nGoodbye world.",
//! );
//!
//! let report = session.search("world", &SearchOptions::default())?;
//! assert_eq!(report.total_occurrences, 2);
//!
//! for hit in &report.hits {
//!     println!("{} @{}: ...{}...", hit.chapter_title, hit.offset, hit.snippet);
//! }
//! # Ok::<(), chapgrep::SearchError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! file_reader ──► chapter::segment ──► Session (Arc<[Chapter]>)
//!                                         │
//!                                         ▼  one call per chapter
//!                                  boyer_moore::search_chars
//!                                         │
//!                                         ▼
//!                                  context (window + highlight)
//! ```
//!
//! The matcher is Boyer-Moore with the bad-character rule only and works on
//! Unicode characters, so offsets are character offsets.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// Boyer-Moore substring search (bad-character heuristic)
pub mod boyer_moore;
/// Chapter segmentation of raw novel text
pub mod chapter;
pub mod context;
/// Error types for chapgrep operations
pub mod error;
pub mod file_reader;
pub mod session;

// Re-exports for Rust consumers

pub use crate::boyer_moore::search;
pub use crate::chapter::{segment, Chapter, UNKNOWN_CHAPTER_TITLE};
pub use crate::context::Highlight;
pub use crate::error::SearchError;
pub use crate::session::{SearchHit, SearchOptions, SearchReport, Session};

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_reexports_agree() {
        let chapters = segment("Chapter1 A\nfoo boo");
        assert_eq!(search(chapters[0].content(), "o"), vec![1, 2, 5, 6]);
    }
}
