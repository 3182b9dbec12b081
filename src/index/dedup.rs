use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use tracing::debug;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::DocumentId;

/// Removes documents whose word-sets duplicate an earlier document's.
///
/// The signature of a document is its set of distinct words, frequencies
/// ignored. Ids are visited in ascending order, so the earliest id with a
/// given signature survives and every later one is dropped. One diagnostic
/// line per removal goes to `sink`.
pub fn remove_duplicates<W: Write>(engine: &mut SearchEngine, sink: &mut W) -> Result<()> {
    let mut seen: HashSet<Vec<Arc<str>>> = HashSet::new();
    let mut duplicates: Vec<DocumentId> = Vec::new();

    let ids: Vec<DocumentId> = engine.document_ids().collect();
    for id in ids {
        let signature: Vec<Arc<str>> = engine.word_frequencies(id)?.keys().cloned().collect();
        if !seen.insert(signature) {
            duplicates.push(id);
        }
    }

    for id in duplicates {
        writeln!(sink, "Found duplicate document id {}", id)?;
        debug!(id = id.value(), "duplicate document removed");
        engine.remove_document(id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocumentStatus;

    fn add(engine: &mut SearchEngine, id: i32, text: &str) {
        engine
            .add_document(DocumentId(id), text, DocumentStatus::Actual, &[0])
            .unwrap();
    }

    #[test]
    fn later_duplicates_are_removed_and_reported() {
        let mut engine = SearchEngine::new();
        add(&mut engine, 1, "a b");
        add(&mut engine, 2, "b a");
        add(&mut engine, 3, "a b c");

        let mut sink = Vec::new();
        remove_duplicates(&mut engine, &mut sink).unwrap();

        assert_eq!(
            engine.document_ids().collect::<Vec<_>>(),
            vec![DocumentId(1), DocumentId(3)]
        );
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "Found duplicate document id 2\n"
        );
    }

    #[test]
    fn frequencies_do_not_affect_the_signature() {
        let mut engine = SearchEngine::new();
        add(&mut engine, 1, "a a b");
        add(&mut engine, 2, "a b b b");

        let mut sink = Vec::new();
        remove_duplicates(&mut engine, &mut sink).unwrap();
        assert_eq!(engine.document_ids().collect::<Vec<_>>(), vec![DocumentId(1)]);
    }

    #[test]
    fn distinct_word_sets_survive() {
        let mut engine = SearchEngine::new();
        add(&mut engine, 1, "a b");
        add(&mut engine, 2, "a c");

        let mut sink = Vec::new();
        remove_duplicates(&mut engine, &mut sink).unwrap();
        assert_eq!(engine.document_count(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn empty_documents_deduplicate_too() {
        let mut engine = SearchEngine::with_stop_words_text("x").unwrap();
        add(&mut engine, 1, "x");
        add(&mut engine, 2, "x x");

        let mut sink = Vec::new();
        remove_duplicates(&mut engine, &mut sink).unwrap();
        assert_eq!(engine.document_ids().collect::<Vec<_>>(), vec![DocumentId(1)]);
    }
}
