use std::collections::VecDeque;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::{Document, DocumentId, DocumentStatus};

/// Bookkeeping over the engine's queries: a rolling window of the most
/// recent requests and how many of them produced nothing.
///
/// The window advances one step per recorded request; it never expires by
/// wall clock. Failed queries propagate their error and are not recorded.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<QueryResult>,
    query_count: u64,
}

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    #[allow(dead_code)]
    number: u64,
    result_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        RequestQueue {
            engine,
            requests: VecDeque::new(),
            query_count: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let documents = self.engine.find_top_documents(raw_query)?;
        self.record(documents.len());
        Ok(documents)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let documents = self.engine.find_top_documents_with_status(raw_query, status)?;
        self.record(documents.len());
        Ok(documents)
    }

    pub fn add_find_request_filtered<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let documents = self.engine.find_top_documents_filtered(raw_query, predicate)?;
        self.record(documents.len());
        Ok(documents)
    }

    /// How many requests in the current window found nothing.
    pub fn no_result_requests(&self) -> usize {
        self.requests
            .iter()
            .filter(|request| request.result_count == 0)
            .count()
    }

    fn record(&mut self, result_count: usize) {
        self.query_count += 1;
        self.requests.push_back(QueryResult {
            number: self.query_count,
            result_count,
        });
        if self.requests.len() > self.engine.config().request_window {
            self.requests.pop_front();
        }
    }
}
