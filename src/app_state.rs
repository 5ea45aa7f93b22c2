use std::sync::Arc;

use crate::scoring::{StyleAnalyzer, TextAnalyzer};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn TextAnalyzer + Send + Sync>,
}

impl AppState {
    pub fn new(analyzer: StyleAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}
