use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::analysis::stopwords::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Document, DocumentId, DocumentMeta, DocumentStatus};
use crate::index::inverted::IndexCore;
use crate::parallel::scorer::ParallelScorer;
use crate::query::parser::QueryParser;
use crate::search::scorer::TfIdfScorer;

/// The search engine facade: stop words, the dual-direction index, and the
/// query pipeline on top of them.
///
/// Mutating operations require `&mut self` and must not run concurrently
/// with anything else; read operations share `&self` freely. The `_par`
/// query variants distribute their per-word work across rayon's pool.
pub struct SearchEngine {
    config: Config,
    stop_words: StopWordFilter,
    index: IndexCore,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        if let Some(threads) = config.search_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .ok();
        }

        SearchEngine {
            config,
            stop_words: StopWordFilter::new(),
            index: IndexCore::new(),
        }
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut engine = SearchEngine::new();
        engine.stop_words = StopWordFilter::from_words(stop_words)?;
        Ok(engine)
    }

    pub fn with_stop_words_text(text: &str) -> Result<Self> {
        let mut engine = SearchEngine::new();
        engine.stop_words = StopWordFilter::from_text(text)?;
        Ok(engine)
    }

    /// Extends the stop-word set. Only documents added afterwards see the
    /// new words; existing index entries are left as they were built.
    pub fn set_stop_words(&mut self, text: &str) -> Result<()> {
        self.stop_words.extend_from_text(text)
    }

    /// Indexes a document. Fails without side effect on a negative id, a
    /// duplicate id, or a control character anywhere in the text.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id.value() < 0 {
            return Err(Error::new(
                ErrorKind::NegativeDocumentId,
                format!("document id {} is negative", id),
            ));
        }
        if self.index.contains(id) {
            return Err(Error::new(
                ErrorKind::DuplicateDocumentId,
                format!("document id {} is already indexed", id),
            ));
        }
        if !is_valid_word(text) {
            return Err(Error::new(
                ErrorKind::InvalidDocumentChar,
                format!("document {} text contains a control character", id),
            ));
        }

        let words: Vec<&str> = split_words(text)
            .filter(|word| !self.stop_words.contains(word))
            .collect();
        let meta = DocumentMeta {
            rating: average_rating(ratings),
            status,
        };
        self.index.insert_document(id, &words, meta);
        debug!(id = id.value(), words = words.len(), "document indexed");

        Ok(())
    }

    pub fn remove_document(&mut self, id: DocumentId) -> Result<()> {
        if !self.index.contains(id) {
            return Err(unknown_document(id));
        }
        self.index.remove_document(id);
        debug!(id = id.value(), "document removed");
        Ok(())
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_filtered(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    pub fn find_top_documents_filtered<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
        let scorer = TfIdfScorer {
            index: &self.index,
            config: &self.config,
        };
        Ok(scorer.find_top(&query, predicate))
    }

    pub fn find_top_documents_par(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_par_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_par_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_par_filtered(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    pub fn find_top_documents_par_filtered<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = QueryParser::new(&self.stop_words).parse_par(raw_query)?;
        let scorer = ParallelScorer {
            index: &self.index,
            config: &self.config,
        };
        Ok(scorer.find_top(&query, predicate))
    }

    /// Returns the include words present in the document, or an empty list
    /// as soon as any exclude word is present, together with the document's
    /// status.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
        let (frequencies, status) = self.document_view(id)?;

        for word in &query.minus_words {
            if frequencies.contains_key(word.as_str()) {
                return Ok((Vec::new(), status));
            }
        }

        let matched: Vec<String> = query
            .plus_words
            .iter()
            .filter(|word| frequencies.contains_key(word.as_str()))
            .cloned()
            .collect();
        Ok((matched, status))
    }

    /// Parallel variant of [`match_document`](Self::match_document); the
    /// output is sorted and deduplicated, identical to the sequential one.
    pub fn match_document_par(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = QueryParser::new(&self.stop_words).parse_par(raw_query)?;
        let (frequencies, status) = self.document_view(id)?;

        let excluded = query
            .minus_words
            .par_iter()
            .any(|word| frequencies.contains_key(word.as_str()));
        if excluded {
            return Ok((Vec::new(), status));
        }

        let mut matched: Vec<String> = query
            .plus_words
            .par_iter()
            .filter(|word| frequencies.contains_key(word.as_str()))
            .cloned()
            .collect();
        matched.sort();
        matched.dedup();
        Ok((matched, status))
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Word → term frequency view of one document.
    pub fn word_frequencies(&self, id: DocumentId) -> Result<&BTreeMap<Arc<str>, f64>> {
        self.index
            .word_frequencies(id)
            .ok_or_else(|| unknown_document(id))
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.ids()
    }

    /// Positional id accessor over the ascending id sequence.
    pub fn get_document_id(&self, index: usize) -> Result<DocumentId> {
        self.index.ids().nth(index).ok_or_else(|| {
            Error::new(
                ErrorKind::IndexOutOfRange,
                format!("document index {} is out of range", index),
            )
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn document_view(&self, id: DocumentId) -> Result<(&BTreeMap<Arc<str>, f64>, DocumentStatus)> {
        let status = self
            .index
            .meta(id)
            .map(|meta| meta.status)
            .ok_or_else(|| unknown_document(id))?;
        let frequencies = self
            .index
            .word_frequencies(id)
            .ok_or_else(|| unknown_document(id))?;
        Ok((frequencies, status))
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

fn unknown_document(id: DocumentId) -> Error {
    Error::new(
        ErrorKind::UnknownDocumentId,
        format!("document id {} is not in the index", id),
    )
}

/// Truncating integer mean; zero for an empty sample list.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
