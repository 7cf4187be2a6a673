//! Dictionary files.
//!
//! Handles:
//! - Encoding detection (BOM, UTF-8, Windows-1252 fallback)
//! - One entry per line, trimmed, blank lines dropped
//! - Writing expanded dictionaries back out

mod variants;

pub use variants::*;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use thiserror::Error;
use tracing::{debug, warn};

/// Dictionary file errors.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to access dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dictionary {path} has no entries")]
    Empty { path: PathBuf },
}

impl DictionaryError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Read a dictionary file, one entry per line.
pub fn load_dictionary(path: &Path) -> DictionaryResult<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| DictionaryError::io(path, e))?;
    let (text, encoding) = decode(&bytes);
    if encoding != UTF_8 {
        warn!(path = %path.display(), encoding = encoding.name(), "Dictionary is not UTF-8");
    }

    let entries = parse_entries(&text);
    if entries.is_empty() {
        return Err(DictionaryError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), entries = entries.len(), "Loaded dictionary");
    Ok(entries)
}

/// Decode file contents, returning the text and the encoding used.
///
/// A BOM wins; otherwise strict UTF-8, then Windows-1252 (never fails).
pub fn decode(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text, encoding);
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => (text, UTF_8),
        None => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text, WINDOWS_1252)
        }
    }
}

/// Trimmed, non-empty lines.
pub fn parse_entries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Write entries as UTF-8, one per line.
pub fn write_dictionary<S: AsRef<str>>(path: &Path, entries: &[S]) -> DictionaryResult<()> {
    let mut text = String::new();
    for entry in entries {
        text.push_str(entry.as_ref());
        text.push('\n');
    }
    std::fs::write(path, text).map_err(|e| DictionaryError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_load_utf8() {
        let file = file_with("Paracetamol 500mg Tablet\n\n  Cyanocobalamin 500µg  \r\nZinc\n".as_bytes());

        let entries = load_dictionary(file.path()).unwrap();
        assert_eq!(entries, vec!["Paracetamol 500mg Tablet", "Cyanocobalamin 500µg", "Zinc"]);
    }

    #[test]
    fn test_load_utf8_bom() {
        let file = file_with(b"\xEF\xBB\xBFAspirin\nZinc\n");

        let entries = load_dictionary(file.path()).unwrap();
        assert_eq!(entries, vec!["Aspirin", "Zinc"]);
    }

    #[test]
    fn test_load_windows_1252_fallback() {
        // 0xE9 is 'é' in Windows-1252 and invalid as UTF-8.
        let file = file_with(b"Caf\xE9ine 200mg\nVitamin B12 1000\xB5g\n");

        let entries = load_dictionary(file.path()).unwrap();
        assert_eq!(entries, vec!["Caféine 200mg", "Vitamin B12 1000µg"]);
    }

    #[test]
    fn test_decode_reports_encoding() {
        assert_eq!(decode(b"abc").1, UTF_8);
        assert_eq!(decode(b"\xFF\xFEa\x00").1, encoding_rs::UTF_16LE);
        let (text, encoding) = decode(b"\x96");
        assert_eq!(encoding, WINDOWS_1252);
        assert_eq!(text, "\u{2013}");
    }

    #[test]
    fn test_load_empty() {
        let file = file_with(b"\n   \n\t\n");

        let err = load_dictionary(file.path()).unwrap_err();
        assert!(matches!(err, DictionaryError::Empty { .. }));
    }

    #[test]
    fn test_load_missing() {
        let err = load_dictionary(Path::new("/nonexistent/medicines.txt")).unwrap_err();
        assert!(matches!(err, DictionaryError::Io { .. }));
    }

    #[test]
    fn test_write_round_trip() {
        let file = NamedTempFile::new().unwrap();
        write_dictionary(file.path(), &["Aspirin", "Zinc 10mg"]).unwrap();

        assert_eq!(load_dictionary(file.path()).unwrap(), vec!["Aspirin", "Zinc 10mg"]);
    }
}
