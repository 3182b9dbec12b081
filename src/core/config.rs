#[derive(Debug, Clone)]
pub struct Config {
    pub max_results: usize,            // Result cap for every find_top query
    pub comparison_error: f64,         // Relevance tie-break epsilon
    pub request_window: usize,         // Rolling request window length
    pub accumulator_shards: usize,     // Sub-maps in the concurrent accumulator
    pub search_threads: Option<usize>, // Default: rayon's global pool size
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_results: 5,
            comparison_error: 1e-6,
            request_window: 1440,
            accumulator_shards: 7,
            search_threads: None,
        }
    }
}
