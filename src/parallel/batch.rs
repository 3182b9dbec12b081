use rayon::prelude::*;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::Document;

/// Runs every query through the default `find_top_documents` across the
/// worker pool. The i-th result list corresponds to the i-th query.
pub fn process_queries(engine: &SearchEngine, queries: &[String]) -> Result<Vec<Vec<Document>>> {
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query))
        .collect()
}

/// [`process_queries`], flattened in query order.
pub fn process_queries_joined(engine: &SearchEngine, queries: &[String]) -> Result<Vec<Document>> {
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
