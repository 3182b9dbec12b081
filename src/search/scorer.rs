use std::collections::BTreeMap;

use crate::core::config::Config;
use crate::core::types::{Document, DocumentId, DocumentStatus};
use crate::index::inverted::IndexCore;
use crate::query::parser::Query;

/// Sequential TF-IDF relevance engine.
///
/// For every include word the scorer walks that word's postings and adds
/// `tf * idf` to the document's accumulator; every exclude word then erases
/// its documents. The surviving accumulator is ranked by
/// [`rank_documents`].
pub struct TfIdfScorer<'a> {
    pub index: &'a IndexCore,
    pub config: &'a Config,
}

impl<'a> TfIdfScorer<'a> {
    pub fn find_top<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let relevance = self.accumulate(query, &predicate);
        rank_documents(self.index, relevance, self.config)
    }

    fn accumulate<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = inverse_document_frequency(self.index.document_count(), postings.len());
            for (&id, &term_freq) in postings {
                let Some(meta) = self.index.meta(id) else {
                    continue;
                };
                if predicate(id, meta.status, meta.rating) {
                    *relevance.entry(id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }

        relevance
    }
}

/// `ln(N / df)` over the live document count. A word with no postings never
/// contributes to the accumulator, so `df = 0` is never scored.
pub(crate) fn inverse_document_frequency(document_count: usize, document_freq: usize) -> f64 {
    (document_count as f64 / document_freq as f64).ln()
}

/// Materializes, sorts, and truncates an accumulated relevance map.
///
/// Ordering: descending relevance; when two relevances differ by less than
/// the comparison epsilon, descending rating breaks the tie.
pub(crate) fn rank_documents(
    index: &IndexCore,
    relevance: BTreeMap<DocumentId, f64>,
    config: &Config,
) -> Vec<Document> {
    let mut documents: Vec<Document> = relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            index
                .meta(id)
                .map(|meta| Document::new(id, relevance, meta.rating))
        })
        .collect();

    let epsilon = config.comparison_error;
    documents.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < epsilon {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance
                .partial_cmp(&lhs.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        }
    });
    documents.truncate(config.max_results);

    documents
}
