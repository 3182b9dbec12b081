use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::analysis::stopwords::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_minus_word, is_valid_word, split_words};
use crate::core::error::{Error, ErrorKind, Result};

/// A parsed query: deduplicated include and exclude word sets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

/// One classified query word before stop-word filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryWord<'a> {
    text: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// Classifies raw query words against a stop-word set.
pub struct QueryParser<'a> {
    stop_words: &'a StopWordFilter,
}

impl<'a> QueryParser<'a> {
    pub fn new(stop_words: &'a StopWordFilter) -> Self {
        QueryParser { stop_words }
    }

    pub fn parse(&self, text: &str) -> Result<Query> {
        let mut query = Query::default();
        for raw in split_words(text) {
            let word = self.parse_word(raw)?;
            Self::collect(&mut query, word);
        }
        Ok(query)
    }

    /// Same contract as [`parse`](Self::parse); the per-word classification
    /// is independent, so it fans out across the worker pool before the
    /// sets are assembled.
    pub fn parse_par(&self, text: &str) -> Result<Query> {
        let raw_words: Vec<&str> = split_words(text).collect();
        let words = raw_words
            .par_iter()
            .map(|raw| self.parse_word(raw))
            .collect::<Result<Vec<_>>>()?;

        let mut query = Query::default();
        for word in words {
            Self::collect(&mut query, word);
        }
        Ok(query)
    }

    fn collect(query: &mut Query, word: QueryWord) {
        if word.is_stop {
            return;
        }
        if word.is_minus {
            query.minus_words.insert(word.text.to_string());
        } else {
            query.plus_words.insert(word.text.to_string());
        }
    }

    fn parse_word<'t>(&self, raw: &'t str) -> Result<QueryWord<'t>> {
        if !is_valid_word(raw) {
            return Err(Error::new(
                ErrorKind::InvalidQueryChar,
                format!("query word {:?} contains a control character", raw),
            ));
        }
        if !is_valid_minus_word(raw) {
            return Err(Error::new(
                ErrorKind::InvalidMinusWord,
                format!("malformed exclusion word {:?}", raw),
            ));
        }

        let (text, is_minus) = match raw.strip_prefix('-') {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };
        if text.is_empty() {
            return Err(Error::new(
                ErrorKind::EmptyQueryWord,
                "query word is empty".to_string(),
            ));
        }

        Ok(QueryWord {
            text,
            is_minus,
            is_stop: self.stop_words.contains(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(stop_text: &str, query: &str) -> Result<Query> {
        let stop_words = StopWordFilter::from_text(stop_text).unwrap();
        QueryParser::new(&stop_words).parse(query)
    }

    #[test]
    fn classifies_plus_and_minus_words() {
        let query = parse("", "cat -city dog").unwrap();
        assert_eq!(
            query.plus_words.iter().collect::<Vec<_>>(),
            vec!["cat", "dog"]
        );
        assert_eq!(query.minus_words.iter().collect::<Vec<_>>(), vec!["city"]);
    }

    #[test]
    fn deduplicates_each_side() {
        let query = parse("", "cat cat -dog -dog").unwrap();
        assert_eq!(query.plus_words.len(), 1);
        assert_eq!(query.minus_words.len(), 1);
    }

    #[test]
    fn drops_stop_words_on_both_sides() {
        let query = parse("in the", "cat in -the").unwrap();
        assert_eq!(query.plus_words.iter().collect::<Vec<_>>(), vec!["cat"]);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn rejects_control_characters() {
        let err = parse("", "ca\u{3}t").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQueryChar);
    }

    #[test]
    fn rejects_malformed_minus_words() {
        assert_eq!(parse("", "-").unwrap_err().kind, ErrorKind::InvalidMinusWord);
        assert_eq!(
            parse("", "--cat").unwrap_err().kind,
            ErrorKind::InvalidMinusWord
        );
    }

    #[test]
    fn parallel_parse_matches_sequential() {
        let stop_words = StopWordFilter::from_text("the").unwrap();
        let parser = QueryParser::new(&stop_words);
        let text = "cat -city dog the -town cat";
        assert_eq!(parser.parse(text).unwrap(), parser.parse_par(text).unwrap());
    }
}
