use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Error)]
pub enum TargetListError {
    #[error("could not read target list '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The ordered list of words to fetch pronunciations for.
///
/// Order and duplicates are preserved exactly as they appear in the input
/// file: each line occupies its own position and keeps its own download
/// counter. A word → positions index is built once at load time so a search
/// hit can be attributed to every position holding that word.
#[derive(Debug, Clone)]
pub struct TargetList {
    words: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl TargetList {
    /// Load a target list from a UTF-8 file, one word per line.
    ///
    /// Lines are trimmed and empty lines skipped. Words are NFC-normalized
    /// so they compare equal to headwords returned by the dictionary API.
    pub fn load(path: &Path) -> Result<Self, TargetListError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TargetListError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.nfc().collect())
            .collect();

        Ok(Self::from_words(words))
    }

    pub fn from_words(words: Vec<String>) -> Self {
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, word) in words.iter().enumerate() {
            positions.entry(word.clone()).or_default().push(i);
        }
        Self { words, positions }
    }

    /// All target words in input order, duplicates included.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    /// The positions a word occupies in the list, if it is a target at all.
    pub fn positions_of(&self, word: &str) -> Option<&[usize]> {
        self.positions.get(word).map(Vec::as_slice)
    }
}
