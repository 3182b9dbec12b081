use std::collections::HashSet;

use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::error::{Error, ErrorKind, Result};

/// The set of words excluded from tokenization of documents and queries.
#[derive(Debug, Default, Clone)]
pub struct StopWordFilter {
    stop_words: HashSet<String>,
}

impl StopWordFilter {
    pub fn new() -> Self {
        StopWordFilter {
            stop_words: HashSet::new(),
        }
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let mut filter = StopWordFilter::new();
        filter.extend_from_text(text)?;
        Ok(filter)
    }

    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = StopWordFilter::new();
        for word in words {
            filter.insert(word.as_ref())?;
        }
        Ok(filter)
    }

    /// Adds every word of `text` to the set. Documents indexed before the
    /// call are not rescrubbed.
    pub fn extend_from_text(&mut self, text: &str) -> Result<()> {
        for word in split_words(text) {
            self.insert(word)?;
        }
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    fn insert(&mut self, word: &str) -> Result<()> {
        if !is_valid_word(word) {
            return Err(Error::new(
                ErrorKind::InvalidDocumentChar,
                format!("stop word {:?} contains a control character", word),
            ));
        }
        self.stop_words.insert(word.to_string());
        Ok(())
    }
}
