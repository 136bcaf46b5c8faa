//! Context windows and keyword highlighting for search hits.
//!
//! All offsets and lengths here are in characters, the same unit the matcher
//! reports.

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Default number of characters shown on each side of a match.
pub const DEFAULT_CONTEXT_RADIUS: usize = 50;

/// How matched keywords are marked inside a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    /// Leave the snippet untouched
    None,
    /// Wrap every keyword occurrence in `open` and `close`
    Markers {
        /// Text inserted before the keyword
        open: String,
        /// Text inserted after the keyword
        close: String,
    },
}

impl Default for Highlight {
    fn default() -> Self {
        Highlight::Markers {
            open: "<strong>".to_string(),
            close: "</strong>".to_string(),
        }
    }
}

/// Character range shown around a match at `offset` of `keyword_len`
/// characters, clamped to `[0, content_len)`.
pub fn context_window(
    content_len: usize,
    offset: usize,
    keyword_len: usize,
    radius: usize,
) -> Range<usize> {
    let start = offset.saturating_sub(radius);
    let end = offset
        .saturating_add(keyword_len)
        .saturating_add(radius)
        .min(content_len);
    start.min(end)..end
}

/// Byte offsets of every character boundary in a text, for slicing it by
/// character ranges many times without rescanning.
#[derive(Debug, Clone)]
pub struct CharBoundaries<'a> {
    text: &'a str,
    bounds: Vec<usize>,
}

impl<'a> CharBoundaries<'a> {
    /// Indexes `text`.
    pub fn new(text: &'a str) -> Self {
        let mut bounds: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        bounds.push(text.len());
        Self { text, bounds }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Slices the text by a character range. The range is clamped to the text.
    pub fn slice(&self, range: Range<usize>) -> &'a str {
        let end = range.end.min(self.char_len());
        let start = range.start.min(end);
        &self.text[self.bounds[start]..self.bounds[end]]
    }

    /// Context window around a match at `offset` of `keyword_len` characters.
    pub fn snippet(&self, offset: usize, keyword_len: usize, radius: usize) -> &'a str {
        self.slice(context_window(self.char_len(), offset, keyword_len, radius))
    }
}

/// Slices the context window out of `content`.
pub fn snippet(content: &str, offset: usize, keyword_len: usize, radius: usize) -> &str {
    CharBoundaries::new(content).snippet(offset, keyword_len, radius)
}

/// Keyword marker built once and applied to any number of snippets.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
    open: String,
    close: String,
}

impl Highlighter {
    /// Prepares highlighting of `keyword` in `style`.
    ///
    /// The keyword is matched literally. With `case_insensitive` the original
    /// casing of the snippet is kept inside the markers.
    pub fn new(keyword: &str, style: &Highlight, case_insensitive: bool) -> Self {
        let (open, close) = match style {
            Highlight::None => return Self::disabled(),
            Highlight::Markers { open, close } => (open, close),
        };
        if keyword.is_empty() {
            return Self::disabled();
        }

        let pattern = match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                tracing::debug!("Highlight disabled for {:?}: {}", keyword, e);
                return Self::disabled();
            }
        };

        Self {
            pattern: Some(pattern),
            open: open.clone(),
            close: close.clone(),
        }
    }

    fn disabled() -> Self {
        Self {
            pattern: None,
            open: String::new(),
            close: String::new(),
        }
    }

    /// Returns true if `apply` changes anything.
    pub fn is_enabled(&self) -> bool {
        self.pattern.is_some()
    }

    /// Marks every keyword occurrence in `snippet`.
    pub fn apply(&self, snippet: &str) -> String {
        let Some(re) = &self.pattern else {
            return snippet.to_string();
        };
        re.replace_all(snippet, |caps: &regex::Captures| {
            format!("{}{}{}", self.open, &caps[0], self.close)
        })
        .into_owned()
    }
}

/// Marks every occurrence of `keyword` in `snippet`.
///
/// Builds a one-off [`Highlighter`]; prefer one `Highlighter` per search when
/// marking many snippets.
pub fn highlight(
    snippet: &str,
    keyword: &str,
    style: &Highlight,
    case_insensitive: bool,
) -> String {
    Highlighter::new(keyword, style, case_insensitive).apply(snippet)
}
