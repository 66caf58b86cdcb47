//! Word lists used for dictionary checks
//!
//! A word list is plain text, one word per line. Lookups are
//! case-insensitive exact matches. The default list is embedded at build
//! time; a list on disk can be used instead and is loaded on first use.

use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default word list (lowercase, one per line)
static WORDS_DATA: &str = include_str!("../../data/words.txt");

static EMBEDDED: Lazy<WordList> = Lazy::new(|| WordList::parse(WORDS_DATA));

/// Errors from a word-list backend.
#[derive(Debug)]
pub enum DictionaryError {
    /// The word list could not be read
    Unavailable { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryError::Unavailable { path, source } => {
                write!(f, "word list {} unavailable: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DictionaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DictionaryError::Unavailable { source, .. } => Some(source),
        }
    }
}

/// Membership test against a word list.
pub trait Dictionary: Send + Sync {
    fn lookup(&self, word: &str) -> Result<bool, DictionaryError>;
}

/// An in-memory word set. Words are stored uppercase.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Parse one word per line. Surrounding whitespace (including `\r`)
    /// is trimmed and blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        text.lines().collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for WordList {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let words = iter
            .into_iter()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_uppercase)
            .collect();
        Self { words }
    }
}

impl Dictionary for WordList {
    fn lookup(&self, word: &str) -> Result<bool, DictionaryError> {
        Ok(self.contains(word))
    }
}

/// The word list shipped with the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWordList;

impl EmbeddedWordList {
    /// Number of words in the embedded list
    pub fn word_count() -> usize {
        EMBEDDED.len()
    }
}

impl Dictionary for EmbeddedWordList {
    fn lookup(&self, word: &str) -> Result<bool, DictionaryError> {
        Ok(EMBEDDED.contains(word))
    }
}

/// A word list read from disk on first lookup and cached afterwards.
/// A failed read is retried on the next lookup.
#[derive(Debug)]
pub struct FileWordList {
    path: PathBuf,
    words: OnceCell<WordList>,
}

impl FileWordList {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            words: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<&WordList, DictionaryError> {
        self.words.get_or_try_init(|| {
            let text = std::fs::read_to_string(&self.path)
                .map_err(|source| DictionaryError::Unavailable {
                    path: self.path.clone(),
                    source,
                })?;
            let words = WordList::parse(&text);
            log::info!("loaded {} words from {}", words.len(), self.path.display());
            Ok(words)
        })
    }
}

impl Dictionary for FileWordList {
    fn lookup(&self, word: &str) -> Result<bool, DictionaryError> {
        Ok(self.load()?.contains(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_valid_words() {
        let dict = EmbeddedWordList;
        for word in ["cat", "dog", "word", "game", "quiz", "at", "ruin", "equip", "aqua"] {
            assert!(dict.lookup(word).unwrap(), "{} should be a word", word);
        }
    }

    #[test]
    fn test_embedded_inflections() {
        let dict = EmbeddedWordList;
        for word in ["eats", "tears", "rats", "runes", "tiles", "played", "scoring"] {
            assert!(dict.lookup(word).unwrap(), "{} should be a word", word);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let dict = EmbeddedWordList;
        assert!(dict.lookup("Tile").unwrap());
        assert!(dict.lookup("TILE").unwrap());
        assert!(dict.lookup("tIlE").unwrap());
    }

    #[test]
    fn test_invalid_words() {
        let dict = EmbeddedWordList;
        assert!(!dict.lookup("xyzzyplugh").unwrap());
        assert!(!dict.lookup("qqq").unwrap());
        assert!(!dict.lookup("").unwrap());
    }

    #[test]
    fn test_embedded_word_count() {
        let count = EmbeddedWordList::word_count();
        assert!(count > 100000, "Expected 100K+ words, got {}", count);
    }

    #[test]
    fn test_parse_handles_crlf_and_blanks() {
        let list = WordList::parse("Cat\r\n\r\n  dog  \nEMU\n");
        assert_eq!(list.len(), 3);
        assert!(list.contains("cat"));
        assert!(list.contains("DOG"));
        assert!(list.contains("emu"));
        assert!(!list.contains(""));
    }

    #[test]
    fn test_file_word_list_loads_on_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zax\nqi").unwrap();

        let dict = FileWordList::new(file.path());
        assert_eq!(dict.path(), file.path());
        assert!(dict.lookup("ZAX").unwrap());
        assert!(dict.lookup("qi").unwrap());
        assert!(!dict.lookup("cat").unwrap());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let dict = FileWordList::new(dir.path().join("missing.txt"));
        let err = dict.lookup("cat").unwrap_err();
        assert!(matches!(err, DictionaryError::Unavailable { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.txt");
        let dict = FileWordList::new(&path);
        assert!(dict.lookup("ox").is_err());

        std::fs::write(&path, "ox\n").unwrap();
        assert!(dict.lookup("ox").unwrap());
    }
}
