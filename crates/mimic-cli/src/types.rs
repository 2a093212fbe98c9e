use std::path::PathBuf;

use serde::Serialize;

/// Outcome of one `clean` invocation.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub datasets: Vec<DatasetOutcome>,
    pub has_errors: bool,
}

impl RunResult {
    pub fn succeeded(&self) -> usize {
        self.datasets.iter().filter(|d| d.error.is_none()).count()
    }
}

/// Per-dataset result; exactly one of `summary` and `error` is set.
#[derive(Debug, Serialize)]
pub struct DatasetOutcome {
    pub dataset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DatasetSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub dataset: String,
    pub source: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub dropped: usize,
    /// Nulls across all columns before cleaning.
    pub nulls_before: usize,
    /// Nulls left after filling (columns without a fill policy keep theirs).
    pub nulls_after: usize,
}
