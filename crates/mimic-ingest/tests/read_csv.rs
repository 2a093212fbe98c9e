//! Integration tests for loading raw exports.

use std::io::Write;

use mimic_ingest::{IngestError, IngestOptions, read_csv_table};
use polars::prelude::DataType;
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn loads_every_column_as_text() {
    let file = create_temp_csv(
        "row_id,subject_id,hadm_id,charttime,valuenum\n\
         1,3,145834,2101-10-20 16:40:00,7.4\n\
         2,3,,2101-10-20 19:59:00,\n",
    );
    let (df, headers) = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

    assert_eq!(
        headers.columns,
        vec!["row_id", "subject_id", "hadm_id", "charttime", "valuenum"]
    );
    assert_eq!(df.height(), 2);
    for col in df.get_columns() {
        assert_eq!(col.dtype(), &DataType::String);
    }
    let hadm = df.column("hadm_id").unwrap().str().unwrap();
    assert_eq!(hadm.get(0), Some("145834"));
    assert_eq!(hadm.get(1), None);
    assert_eq!(df.column("valuenum").unwrap().null_count(), 1);
}

#[test]
fn blank_fields_load_as_null() {
    let file = create_temp_csv("language,religion\nENGL,\"  \"\n,CATHOLIC\n");
    let (df, _) = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

    let language = df.column("language").unwrap().str().unwrap();
    let religion = df.column("religion").unwrap().str().unwrap();
    assert_eq!(language.get(1), None);
    assert_eq!(religion.get(0), None);
    assert_eq!(religion.get(1), Some("CATHOLIC"));
}

#[test]
fn lowercases_official_headers() {
    let file = create_temp_csv("\u{feff}ROW_ID,GENDER\n1,F\n");
    let (df, headers) = read_csv_table(
        file.path(),
        &IngestOptions::default().with_lowercase_headers(true),
    )
    .unwrap();

    assert_eq!(headers.columns, vec!["row_id", "gender"]);
    assert!(df.column("gender").is_ok());
}

#[test]
fn ragged_rows_are_parse_errors() {
    let file = create_temp_csv("a,b,c\n1,2,3\n4,5,6,7\n");
    let err = read_csv_table(file.path(), &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::RaggedRecord { found: 4, .. }));
}

#[test]
fn empty_file_is_parse_error() {
    let file = create_temp_csv("");
    let err = read_csv_table(file.path(), &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn blank_lines_do_not_become_rows() {
    let file = create_temp_csv(
        "subject_id,itemid,valuenum\n\
         3,50868,7.4\n\
         \n\
         4,50868,\n\
         \n",
    );
    let (df, _) = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

    assert_eq!(df.height(), 2);
    let subject = df.column("subject_id").unwrap().str().unwrap();
    assert_eq!(subject.get(0), Some("3"));
    assert_eq!(subject.get(1), Some("4"));
    assert_eq!(df.column("subject_id").unwrap().null_count(), 0);
    assert_eq!(df.column("valuenum").unwrap().null_count(), 1);
}

#[test]
fn short_rows_report_line_and_widths() {
    let file = create_temp_csv("a,b,c\n1,2,3\n\n4,5\n");
    let err = read_csv_table(file.path(), &IngestOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::RaggedRecord {
            expected: 3,
            found: 2,
            ..
        }
    ));
}
