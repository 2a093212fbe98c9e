//! Per-dataset pipeline: load, clean, export.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use mimic_ingest::IngestOptions;
use mimic_model::DatasetSpec;
use mimic_output::export;
use mimic_transform::{Table, clean_table, load, null_counts};
use tracing::{error, info, info_span};

use crate::types::{DatasetOutcome, DatasetSummary, RunResult};

/// Where datasets are read from and written to.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ingest: IngestOptions,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ingest: IngestOptions::default().with_lowercase_headers(true),
        }
    }

    #[must_use]
    pub fn with_ingest(mut self, ingest: IngestOptions) -> Self {
        self.ingest = ingest;
        self
    }

    pub fn source_path(&self, spec: &DatasetSpec) -> PathBuf {
        self.input_dir.join(&spec.source)
    }

    pub fn output_path(&self, spec: &DatasetSpec) -> PathBuf {
        self.output_dir.join(spec.output_file())
    }
}

fn total_nulls(table: &Table) -> usize {
    null_counts(table).iter().map(|(_, nulls)| nulls).sum()
}

/// Run load → clean → export for one dataset.
pub fn run_dataset(spec: &DatasetSpec, config: &PipelineConfig) -> Result<DatasetSummary> {
    let span = info_span!("dataset", dataset = %spec.name);
    let _guard = span.enter();
    let started = Instant::now();

    let source = config.source_path(spec);
    let output = config.output_path(spec);

    let raw = load(&source, &config.ingest)
        .with_context(|| format!("load {}", source.display()))?;
    let cleaned = clean_table(&raw, spec).with_context(|| format!("clean {}", spec.name))?;
    export(&cleaned, &output).with_context(|| format!("export {}", output.display()))?;

    let summary = DatasetSummary {
        dataset: spec.name.clone(),
        source,
        output,
        rows: cleaned.height(),
        columns: cleaned.width(),
        dropped: raw.width().saturating_sub(cleaned.width()),
        nulls_before: total_nulls(&raw),
        nulls_after: total_nulls(&cleaned),
    };
    info!(
        rows = summary.rows,
        columns = summary.columns,
        filled = summary.nulls_before.saturating_sub(summary.nulls_after),
        elapsed_ms = started.elapsed().as_millis(),
        "dataset cleaned"
    );
    Ok(summary)
}

/// Run every spec in order. A failing dataset is recorded and the rest still run.
pub fn run_datasets(specs: &[DatasetSpec], config: &PipelineConfig) -> RunResult {
    let mut datasets = Vec::with_capacity(specs.len());
    for spec in specs {
        let outcome = match run_dataset(spec, config) {
            Ok(summary) => DatasetOutcome {
                dataset: spec.name.clone(),
                summary: Some(summary),
                error: None,
            },
            Err(err) => {
                error!(dataset = %spec.name, error = %format!("{err:#}"), "dataset failed");
                DatasetOutcome {
                    dataset: spec.name.clone(),
                    summary: None,
                    error: Some(format!("{err:#}")),
                }
            }
        };
        datasets.push(outcome);
    }
    let has_errors = datasets.iter().any(|d| d.error.is_some());
    RunResult {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        datasets,
        has_errors,
    }
}

/// Write the run report as pretty-printed JSON.
pub fn write_report(result: &RunResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let file =
        std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, result)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
