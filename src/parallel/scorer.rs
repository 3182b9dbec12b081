use rayon::prelude::*;

use crate::core::config::Config;
use crate::core::types::{Document, DocumentId, DocumentStatus};
use crate::index::inverted::IndexCore;
use crate::parallel::accumulator::ConcurrentMap;
use crate::query::parser::Query;
use crate::search::scorer::{inverse_document_frequency, rank_documents};

/// Parallel TF-IDF relevance engine.
///
/// Same contract and output as the sequential scorer: the per-(document,
/// term) addition happens exactly once, additions to one document serialize
/// on its shard lock, and the tie-break comparator is deterministic, so the
/// ranked sequence is identical for identical inputs.
pub struct ParallelScorer<'a> {
    pub index: &'a IndexCore,
    pub config: &'a Config,
}

impl<'a> ParallelScorer<'a> {
    pub fn find_top<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator: ConcurrentMap<DocumentId, f64> =
            ConcurrentMap::new(self.config.accumulator_shards);

        query.plus_words.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            let idf = inverse_document_frequency(self.index.document_count(), postings.len());
            for (&id, &term_freq) in postings {
                let Some(meta) = self.index.meta(id) else {
                    continue;
                };
                if predicate(id, meta.status, meta.rating) {
                    *accumulator.lock(id).value_mut() += term_freq * idf;
                }
            }
        });

        let mut relevance = accumulator.build_ordinary_map();

        // The minus phase runs after the flatten, on the snapshot.
        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }

        rank_documents(self.index, relevance, self.config)
    }
}
