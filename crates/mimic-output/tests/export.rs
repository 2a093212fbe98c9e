//! Parquet export tests.

use std::fs::File;

use mimic_model::{ColumnType, Sentinel};
use mimic_output::{OutputError, export, to_export_frame};
use mimic_transform::{Table, cast_columns, fill_missing};
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, ParquetReader, SerReader, Series};
use tempfile::TempDir;

fn cleaned_table() -> Table {
    let df = DataFrame::new(vec![
        Column::new("subject_id".into(), &[Some("1"), Some("2"), Some("3")]),
        Column::new("gender".into(), &[Some("F"), None, Some("M")]),
        Column::new("valuenum".into(), &[Some("7.4"), None, Some("1")]),
        Column::new(
            "dod".into(),
            &[None, Some("2101-10-31 13:58:00"), None],
        ),
    ])
    .unwrap();
    let table = cast_columns(
        &Table::new("PATIENTS", df),
        &[
            ("subject_id", ColumnType::Integer),
            ("gender", ColumnType::Categorical),
            ("valuenum", ColumnType::Numeric),
        ],
    )
    .unwrap();
    let unknown = Sentinel::Text("Unknown".to_string());
    let minus_one = Sentinel::Integer(-1);
    fill_missing(&table, &[("gender", &unknown), ("valuenum", &minus_one)]).unwrap()
}

fn read_back(path: &std::path::Path) -> DataFrame {
    ParquetReader::new(File::open(path).unwrap()).finish().unwrap()
}

#[test]
fn export_preserves_column_types() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("PATIENTS.parquet");
    export(&cleaned_table(), &path).unwrap();

    let df = read_back(&path);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column("subject_id").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("valuenum").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("dod").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("dod").unwrap().null_count(), 2);
    assert!(matches!(
        df.column("gender").unwrap().dtype(),
        DataType::Enum(..)
    ));

    let gender = df.column("gender").unwrap().cast(&DataType::String).unwrap();
    assert_eq!(gender.str().unwrap().get(1), Some("Unknown"));
}

#[test]
fn export_replaces_existing_file_with_identical_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("PATIENTS.parquet");
    std::fs::write(&path, b"stale contents").unwrap();

    let table = cleaned_table();
    export(&table, &path).unwrap();
    let first = std::fs::read(&path).unwrap();
    export(&table, &path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with(b"PAR1"));
}

#[test]
fn export_to_unwritable_destination_is_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let err = export(&cleaned_table(), &blocker.join("PATIENTS.parquet")).unwrap_err();
    assert!(matches!(err, OutputError::Io { .. }));
}

#[test]
fn exported_categories_stay_within_label_set() {
    let table = cleaned_table();
    let labels = table.labels("gender").unwrap().clone();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("PATIENTS.parquet");
    export(&table, &path).unwrap();

    let df = read_back(&path);
    let gender = df.column("gender").unwrap().cast(&DataType::String).unwrap();
    let values: Vec<&str> = gender.str().unwrap().into_no_null_iter().collect();
    assert_eq!(values, vec!["F", "Unknown", "M"]);
    assert!(values.iter().all(|v| labels.contains(*v)));
}

#[test]
fn fill_label_is_a_category_without_missing_values() {
    let df = DataFrame::new(vec![Column::new(
        "religion".into(),
        &[Some("CATHOLIC"), Some("JEWISH")],
    )])
    .unwrap();
    let table = cast_columns(
        &Table::new("ADMISSIONS", df),
        &[("religion", ColumnType::Categorical)],
    )
    .unwrap();
    let unknown = Sentinel::Text("Unknown".to_string());
    let table = fill_missing(&table, &[("religion", &unknown)]).unwrap();

    let exported = to_export_frame(&table).unwrap();
    let dtype = exported.column("religion").unwrap().dtype().clone();
    assert!(matches!(dtype, DataType::Enum(..)));
    assert!(
        Series::new("religion".into(), ["Unknown"])
            .strict_cast(&dtype)
            .is_ok()
    );
    assert!(
        Series::new("religion".into(), ["BUDDHIST"])
            .strict_cast(&dtype)
            .is_err()
    );
}

#[test]
fn value_outside_label_set_fails_export() {
    let mut table = cleaned_table();
    table
        .data
        .with_column(Column::new(
            "gender".into(),
            &[Some("F"), Some("X"), Some("M")],
        ))
        .unwrap();

    let err = to_export_frame(&table).unwrap_err();
    assert!(matches!(
        err,
        OutputError::Prepare { ref column, .. } if column == "gender"
    ));
}
