//! Source document loading with automatic gzip decompression
//!
//! Novels are loaded whole into memory before segmentation. Files ending in
//! `.gz` are decompressed on the fly and `-` reads from stdin.
//!
//! # Example
//!
//! ```rust,no_run
//! use chapgrep::file_reader;
//!
//! let text = file_reader::read_source("novel.txt.gz")?;
//! println!("{} bytes", text.len());
//! # Ok::<(), chapgrep::SearchError>(())
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Result, SearchError};

/// Buffer size for file reading (128KB)
const BUFFER_SIZE: usize = 128 * 1024;

/// Open a file with automatic gzip detection based on file extension
///
/// Files ending in `.gz` (case-insensitive) are automatically decompressed.
/// Special case: path "-" reads from stdin.
///
/// # Errors
///
/// Returns an error if the file doesn't exist or cannot be opened.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();

    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let file = File::open(path)?;
    Ok(from_file(file, is_gzip_path(path)))
}

/// Create a reader from an already-opened file with explicit gzip flag
pub fn from_file(file: File, is_gzip: bool) -> Box<dyn BufRead + Send> {
    if is_gzip {
        let decoder = GzDecoder::new(file);
        Box::new(BufReader::with_capacity(BUFFER_SIZE, decoder))
    } else {
        Box::new(BufReader::with_capacity(BUFFER_SIZE, file))
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Read an entire source document into a `String`
///
/// Invalid UTF-8 sequences are replaced with U+FFFD and a warning is logged.
///
/// # Errors
///
/// Any open or read failure, including corrupt gzip data, is reported as
/// [`SearchError::SourceUnavailable`].
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let unavailable = |e: io::Error| SearchError::SourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut reader = open(path).map_err(unavailable)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(unavailable)?;

    Ok(decode_utf8(bytes, path))
}

fn decode_utf8(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                "Source {} is not valid UTF-8 (first error at byte {}), decoding lossily",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
