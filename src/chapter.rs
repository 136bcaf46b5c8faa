//! Chapter segmentation.
//!
//! Raw novel text is split into chapters at every chapter marker: the literal
//! `Chapter`, 1 to 5 ASCII digits, and a single space (`Chapter12 `). The marker
//! stays at the start of the segment it introduces. Any text before the first
//! marker forms its own segment.
//!
//! Each segment is then given a display title:
//!
//! ```text
//! Chapter12 The Long Wall\n...body...   →   title "第12章-The Long Wall"
//! ```
//!
//! Segments without a well-formed header keep their whole text as content and
//! get the title [`UNKNOWN_CHAPTER_TITLE`].
//!
//! # Examples
//!
//! ```
//! use chapgrep::chapter::segment;
//!
//! let chapters = segment("Chapter1 Intro\nHello world.\nChapter2 Next\nGoodbye.");
//! assert_eq!(chapters.len(), 2);
//! assert_eq!(chapters[0].title(), "第1章-Intro");
//! assert_eq!(chapters[0].content(), "Hello world.");
//! assert_eq!(chapters[1].index(), 1);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Title given to segments whose header could not be parsed.
pub const UNKNOWN_CHAPTER_TITLE: &str = "Unknown Chapter";

/// Maximum characters of a malformed segment echoed in diagnostics.
const DIAGNOSTIC_PREVIEW_CHARS: usize = 80;

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Chapter[0-9]{1,5} ").expect("valid marker regex"));

// The title runs to the first line break or end of segment. Line separators
// before that break make the header malformed.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Chapter([0-9]{1,5}) ([^\r\n\x{2028}\x{2029}]+)(?:[\r\n]|$)")
        .expect("valid header regex")
});

/// A single chapter of a segmented document.
///
/// Chapters are immutable once created; a new document produces a new
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    title: String,
    content: String,
    index: usize,
}

impl Chapter {
    pub(crate) fn new(title: String, content: String, index: usize) -> Self {
        Self {
            title,
            content,
            index,
        }
    }

    /// Display title, e.g. `第3章-Name` or [`UNKNOWN_CHAPTER_TITLE`].
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Chapter body with the header line removed, trimmed.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// 0-based position in the segmented sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the header of this chapter could not be parsed.
    pub fn is_untitled(&self) -> bool {
        self.title == UNKNOWN_CHAPTER_TITLE
    }
}

/// Parsed `ChapterN Name` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeader {
    /// Chapter number exactly as written (leading zeros kept)
    pub number: String,
    /// Title text after the number, trimmed
    pub name: String,
    /// Byte length of the header within the segment
    pub header_len: usize,
}

impl ChapterHeader {
    /// Formats the display title, `第{number}章-{name}`.
    pub fn display_title(&self) -> String {
        format!("第{}章-{}", self.number, self.name)
    }
}

/// Matches a chapter header at the very start of `segment`.
pub fn parse_header(segment: &str) -> Option<ChapterHeader> {
    let caps = HEADER_RE.captures(segment)?;
    let number = caps.get(1)?;
    let name = caps.get(2)?;

    Some(ChapterHeader {
        number: number.as_str().to_string(),
        name: trim_text(name.as_str()).to_string(),
        header_len: name.end(),
    })
}

/// Splits `raw_text` in front of every chapter marker.
///
/// Empty segments are dropped. The returned slices borrow from `raw_text` and
/// appear in source order.
pub fn split_segments(raw_text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for marker in MARKER_RE.find_iter(raw_text) {
        if marker.start() > start {
            segments.push(&raw_text[start..marker.start()]);
        }
        start = marker.start();
    }
    if start < raw_text.len() {
        segments.push(&raw_text[start..]);
    }

    segments
}

/// Segments a raw document into its ordered chapter sequence.
///
/// Malformed headers are not fatal: the chapter is titled
/// [`UNKNOWN_CHAPTER_TITLE`], its whole trimmed segment becomes the content,
/// and a warning naming the segment is logged.
pub fn segment(raw_text: &str) -> Vec<Chapter> {
    split_segments(raw_text)
        .into_iter()
        .enumerate()
        .map(|(index, seg)| match parse_header(seg) {
            Some(header) => Chapter::new(
                header.display_title(),
                trim_text(&seg[header.header_len..]).to_string(),
                index,
            ),
            None => {
                tracing::warn!(
                    "Chapter without title at index {} ({} chars): {:?}",
                    index,
                    seg.chars().count(),
                    preview(seg)
                );
                Chapter::new(
                    UNKNOWN_CHAPTER_TITLE.to_string(),
                    trim_text(seg).to_string(),
                    index,
                )
            }
        })
        .collect()
}

/// Trims whitespace and byte order marks from both ends of `text`.
pub(crate) fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn preview(segment: &str) -> String {
    let mut out: String = segment.chars().take(DIAGNOSTIC_PREVIEW_CHARS).collect();
    if segment.chars().nth(DIAGNOSTIC_PREVIEW_CHARS).is_some() {
        out.push('…');
    }
    out
}
