pub mod analysis;
pub mod core;
pub mod index;
pub mod parallel;
pub mod query;
pub mod search;

/*
┌──────────────────────────────────────────────────────────────────────┐
│                        FINDEX ARCHITECTURE                           │
└──────────────────────────────────────────────────────────────────────┘

  core::engine::SearchEngine
  ├── analysis::stopwords::StopWordFilter   // shared stop-word set
  ├── analysis::tokenizer                   // ASCII-space split + validators
  ├── index::inverted::IndexCore            // interned words, forward map
  │                                         // (doc → word → tf), inverse map
  │                                         // (word → doc → tf), metadata,
  │                                         // ordered id set
  ├── query::parser::QueryParser            // plus/minus word classification
  ├── search::scorer::TfIdfScorer           // sequential tf·idf + ranking
  └── parallel::scorer::ParallelScorer      // rayon fan-out over plus words,
      └── parallel::accumulator::ConcurrentMap  // 7 mutex-guarded sub-maps

  On top of the engine:
  ├── index::dedup::remove_duplicates       // word-set duplicate sweep
  ├── search::requests::RequestQueue        // rolling no-result window
  └── parallel::batch::process_queries      // batch query multiplexing

  Mutators (add/remove/dedup) take &mut and are externally serialized;
  reads share &self and may run concurrently with each other.
*/
