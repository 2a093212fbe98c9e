use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use comfy_table::Table;
use mimic_ingest::IngestOptions;
use mimic_model::{DatasetSpec, TIMESTAMP_FORMAT};
use mimic_standards::{SpecRegistry, load_spec_file};
use mimic_transform::{average_age, load};
use tracing::info;

use mimic_cli::pipeline::{PipelineConfig, run_datasets, write_report};
use mimic_cli::types::RunResult;

use crate::cli::{AgeArgs, CleanArgs};
use crate::summary::apply_table_style;

pub fn run_list_datasets() -> Result<()> {
    let registry = SpecRegistry::builtin().context("load built-in specs")?;
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "Source", "Output", "Columns", "Description"]);
    apply_table_style(&mut table);
    for spec in registry.iter() {
        table.add_row(vec![
            spec.name.clone(),
            spec.source.clone(),
            spec.output_file(),
            spec.columns.len().to_string(),
            spec.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Resolve the requested specs: built-ins, overridden by `--spec` files.
fn select_specs(args: &CleanArgs) -> Result<Vec<DatasetSpec>> {
    let mut registry = SpecRegistry::builtin().context("load built-in specs")?;
    let mut user_specs = Vec::new();
    for path in &args.specs {
        let spec = load_spec_file(path).with_context(|| format!("load spec {}", path.display()))?;
        user_specs.push(spec.name.clone());
        registry.insert(spec);
    }

    if args.all {
        return Ok(registry.iter().cloned().collect());
    }
    let mut names = args.datasets.clone();
    if names.is_empty() {
        names = user_specs;
    }
    if names.is_empty() {
        bail!("no datasets selected; name one or pass --all");
    }
    names
        .iter()
        .map(|name| registry.get(name).cloned().map_err(anyhow::Error::from))
        .collect()
}

pub fn run_clean(args: &CleanArgs) -> Result<RunResult> {
    let specs = select_specs(args)?;
    let ingest = IngestOptions::default().with_lowercase_headers(!args.keep_header_case);
    let config = PipelineConfig::new(args.input_dir(), args.output_dir()).with_ingest(ingest);
    info!(
        datasets = specs.len(),
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        "cleaning"
    );

    let result = run_datasets(&specs, &config);
    if let Some(path) = &args.report {
        write_report(&result, path)?;
    }
    Ok(result)
}

pub fn run_age(args: &AgeArgs) -> Result<()> {
    let reference = NaiveDateTime::parse_from_str(args.reference.trim(), TIMESTAMP_FORMAT)
        .with_context(|| format!("invalid reference timestamp '{}'", args.reference))?;
    let table = load(
        &args.patients,
        &IngestOptions::default().with_lowercase_headers(true),
    )
    .with_context(|| format!("load {}", args.patients.display()))?;

    match average_age(&table, reference)? {
        Some(summary) => {
            let mut out = Table::new();
            out.set_header(vec!["Patients", "Average age", "Youngest", "Oldest"]);
            apply_table_style(&mut out);
            out.add_row(vec![
                summary.count.to_string(),
                format!("{:.2}", summary.mean),
                format!("{:.2}", summary.min),
                format!("{:.2}", summary.max),
            ]);
            println!("{out}");
        }
        None => println!("No patients with a computable age."),
    }
    Ok(())
}
