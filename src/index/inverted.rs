use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::core::types::{DocumentId, DocumentMeta};

/// The index state: interned words, both map directions, and document
/// metadata.
///
/// Every distinct word is stored once in `words`; the forward and inverse
/// maps hold cheap `Arc` handles into that store. Words are never removed,
/// so a handle obtained from any map stays valid for the lifetime of the
/// index.
///
/// After every public operation the two directions agree: `w` is a key of
/// `forward[d]` exactly when `d` is a key of `inverse[w]`, with equal stored
/// frequencies.
pub struct IndexCore {
    words: HashSet<Arc<str>>,
    inverse: HashMap<Arc<str>, BTreeMap<DocumentId, f64>>,
    forward: HashMap<DocumentId, BTreeMap<Arc<str>, f64>>,
    documents: HashMap<DocumentId, DocumentMeta>,
    document_ids: BTreeSet<DocumentId>,
}

impl IndexCore {
    pub fn new() -> Self {
        IndexCore {
            words: HashSet::new(),
            inverse: HashMap::new(),
            forward: HashMap::new(),
            documents: HashMap::new(),
            document_ids: BTreeSet::new(),
        }
    }

    /// Materializes a document from its already-tokenized, stop-filtered
    /// word list. The caller has validated the id and the text.
    ///
    /// Each occurrence contributes `1 / words.len()` to the word's term
    /// frequency, so repeats accumulate by summation.
    pub fn insert_document(&mut self, id: DocumentId, words: &[&str], meta: DocumentMeta) {
        let inv_word_count = 1.0 / words.len() as f64;
        let mut frequencies: BTreeMap<Arc<str>, f64> = BTreeMap::new();

        for raw in words {
            let word = self.intern(raw);
            *frequencies.entry(Arc::clone(&word)).or_insert(0.0) += inv_word_count;
            *self
                .inverse
                .entry(word)
                .or_default()
                .entry(id)
                .or_insert(0.0) += inv_word_count;
        }

        self.forward.insert(id, frequencies);
        self.documents.insert(id, meta);
        self.document_ids.insert(id);
    }

    /// Unlinks a document from both directions. An inverse entry left with
    /// no postings is kept; the word store is append-only.
    pub fn remove_document(&mut self, id: DocumentId) {
        if let Some(frequencies) = self.forward.remove(&id) {
            for word in frequencies.keys() {
                if let Some(postings) = self.inverse.get_mut(word) {
                    postings.remove(&id);
                }
            }
        }
        self.documents.remove(&id);
        self.document_ids.remove(&id);
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Documents containing `word`, with their term frequencies.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.inverse.get(word)
    }

    /// Word → term frequency view of one document.
    pub fn word_frequencies(&self, id: DocumentId) -> Option<&BTreeMap<Arc<str>, f64>> {
        self.forward.get(&id)
    }

    pub fn meta(&self, id: DocumentId) -> Option<&DocumentMeta> {
        self.documents.get(&id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live document ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    fn intern(&mut self, raw: &str) -> Arc<str> {
        if let Some(word) = self.words.get(raw) {
            return Arc::clone(word);
        }
        let word: Arc<str> = Arc::from(raw);
        self.words.insert(Arc::clone(&word));
        word
    }
}

impl Default for IndexCore {
    fn default() -> Self {
        IndexCore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocumentStatus;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            rating: 0,
            status: DocumentStatus::Actual,
        }
    }

    #[test]
    fn insert_populates_both_directions() {
        let mut index = IndexCore::new();
        index.insert_document(DocumentId(1), &["cat", "city", "cat"], meta());

        let forward = index.word_frequencies(DocumentId(1)).unwrap();
        assert!((forward["cat"] - 2.0 / 3.0).abs() < 1e-12);
        assert!((forward["city"] - 1.0 / 3.0).abs() < 1e-12);

        let postings = index.postings("cat").unwrap();
        assert_eq!(postings.len(), 1);
        assert!((postings[&DocumentId(1)] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn remove_unlinks_inverse_postings() {
        let mut index = IndexCore::new();
        index.insert_document(DocumentId(1), &["cat"], meta());
        index.insert_document(DocumentId(2), &["cat"], meta());
        index.remove_document(DocumentId(1));

        assert!(!index.contains(DocumentId(1)));
        assert!(index.word_frequencies(DocumentId(1)).is_none());
        let postings = index.postings("cat").unwrap();
        assert_eq!(postings.keys().copied().collect::<Vec<_>>(), vec![DocumentId(2)]);
    }

    #[test]
    fn empty_word_list_still_registers_the_document() {
        let mut index = IndexCore::new();
        index.insert_document(DocumentId(7), &[], meta());
        assert!(index.contains(DocumentId(7)));
        assert!(index.word_frequencies(DocumentId(7)).unwrap().is_empty());
        assert_eq!(index.ids().collect::<Vec<_>>(), vec![DocumentId(7)]);
    }

    #[test]
    fn ids_iterate_ascending() {
        let mut index = IndexCore::new();
        for id in [5, 1, 3] {
            index.insert_document(DocumentId(id), &["word"], meta());
        }
        let ids: Vec<i32> = index.ids().map(|id| id.value()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn words_are_interned_once() {
        let mut index = IndexCore::new();
        index.insert_document(DocumentId(1), &["shared"], meta());
        index.insert_document(DocumentId(2), &["shared"], meta());

        let a = index.word_frequencies(DocumentId(1)).unwrap().keys().next().unwrap();
        let b = index.word_frequencies(DocumentId(2)).unwrap().keys().next().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }
}
