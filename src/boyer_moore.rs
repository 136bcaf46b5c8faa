//! Single-pattern Boyer-Moore search using the bad-character heuristic.
//!
//! Finds every occurrence of a keyword in a text, scanning alignments left to
//! right and comparing each alignment right to left. Only the bad-character rule
//! is used to compute shifts; there is no good-suffix table.
//!
//! Matching works on Unicode scalar values (`char`), so offsets are character
//! offsets, not byte offsets. Use [`char_to_byte_offset`] to slice the original
//! `&str`.
//!
//! # Examples
//!
//! ```
//! use chapgrep::boyer_moore::search;
//!
//! assert_eq!(search("foo boo", "o"), vec![1, 2, 5, 6]);
//! assert_eq!(search("Hello world. Hello there.", "Hello"), vec![0, 13]);
//! assert!(search("short", "").is_empty());
//! ```

use rustc_hash::FxHashMap;

/// Number of characters served by the dense lookup array.
const ASCII_TABLE_SIZE: usize = 128;

/// Rightmost position of each pattern character.
///
/// ASCII characters live in a dense array; everything else goes through an
/// FxHash map. Characters that never occur in the pattern report `-1`.
#[derive(Debug, Clone)]
pub struct BadCharTable {
    ascii: [isize; ASCII_TABLE_SIZE],
    other: FxHashMap<char, usize>,
    distinct: usize,
}

impl BadCharTable {
    /// Builds the table for `pattern`. Later positions overwrite earlier ones,
    /// so every entry holds the last index of its character.
    pub fn new(pattern: &[char]) -> Self {
        let mut ascii = [-1isize; ASCII_TABLE_SIZE];
        let mut other = FxHashMap::default();
        let mut distinct = 0;

        for (i, &ch) in pattern.iter().enumerate() {
            let code = ch as usize;
            if code < ASCII_TABLE_SIZE {
                if ascii[code] < 0 {
                    distinct += 1;
                }
                ascii[code] = i as isize;
            } else if other.insert(ch, i).is_none() {
                distinct += 1;
            }
        }

        Self {
            ascii,
            other,
            distinct,
        }
    }

    /// Last index of `ch` in the pattern, or `-1` if it does not occur.
    #[inline]
    pub fn lookup(&self, ch: char) -> isize {
        let code = ch as usize;
        if code < ASCII_TABLE_SIZE {
            self.ascii[code]
        } else {
            self.other.get(&ch).map_or(-1, |&i| i as isize)
        }
    }

    /// Number of distinct characters in the pattern.
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// Returns true for a table built from an empty pattern.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }
}

/// Finds all occurrences of `pattern` in `text`.
///
/// Returns character offsets in strictly increasing order. An empty pattern,
/// or a pattern with more characters than `text`, yields no occurrences.
pub fn search(text: &str, pattern: &str) -> Vec<usize> {
    if pattern.is_empty() {
        return Vec::new();
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    search_chars(&text, &pattern)
}

/// Same as [`search`], over already-decoded characters.
pub fn search_chars(text: &[char], pattern: &[char]) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();
    let mut occurrences = Vec::new();

    if m == 0 || m > n {
        return occurrences;
    }

    // Built per call: cost is proportional to the pattern only.
    let table = BadCharTable::new(pattern);

    let mut shift = 0;
    while shift <= n - m {
        let mut j = m as isize - 1;
        while j >= 0 && pattern[j as usize] == text[shift + j as usize] {
            j -= 1;
        }

        if j < 0 {
            occurrences.push(shift);
            // lookup() <= m - 1 for any character, so this is at least 1
            shift += if shift + m < n {
                (m as isize - table.lookup(text[shift + m])) as usize
            } else {
                1
            };
        } else {
            let bad = text[shift + j as usize];
            shift += (j - table.lookup(bad)).max(1) as usize;
        }
    }

    occurrences
}

/// Converts a character offset into a byte offset within `text`.
///
/// Offsets at or past the end map to `text.len()`.
pub fn char_to_byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte, _)| byte)
}
