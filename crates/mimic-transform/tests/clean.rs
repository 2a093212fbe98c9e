//! End-to-end cleaning of raw exports with the built-in dataset specs.

use std::io::Write;

use mimic_ingest::IngestOptions;
use mimic_model::{ColumnType, SENTINEL_TIMESTAMP};
use mimic_standards::builtin_spec;
use mimic_transform::{Table, TransformError, clean_table, load};
use polars::prelude::DataType;
use tempfile::TempDir;

const ADMISSIONS_HEADER: &str = "row_id,subject_id,hadm_id,admittime,dischtime,deathtime,\
admission_type,admission_location,discharge_location,insurance,language,religion,\
marital_status,ethnicity,edregtime,edouttime,diagnosis,hospital_expire_flag,has_chartevents_data";

fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

fn load_admissions(dir: &TempDir, rows: &[&str]) -> Table {
    let mut content = format!("{ADMISSIONS_HEADER}\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = write_csv(dir, "ADMISSIONS.csv", &content);
    load(&path, &IngestOptions::default()).unwrap()
}

#[test]
fn admissions_keeps_death_nulls_and_fills_the_rest() {
    let dir = TempDir::new().unwrap();
    let table = load_admissions(
        &dir,
        &[
            "21,22,165315,2196-04-09 12:26:00,2196-04-10 15:54:00,,EMERGENCY,EMERGENCY ROOM ADMIT,\
             DISC-TRAN CANCER/CHLDRN H,Private,,UNOBTAINABLE,MARRIED,WHITE,,,BENZODIAZEPINE OVERDOSE,0,1",
            "22,23,152223,2153-09-03 07:15:00,2153-09-08 19:10:00,2153-09-08 19:10:00,ELECTIVE,\
             PHYS REFERRAL/NORMAL DELI,HOME HEALTH CARE,Medicare,ENGL,CATHOLIC,,WHITE,\
             2153-09-03 06:00:00,2153-09-03 07:00:00,CORONARY ARTERY DISEASE,1,1",
        ],
    );
    let spec = builtin_spec("ADMISSIONS").unwrap();
    let out = clean_table(&table, &spec).unwrap();

    assert_eq!(out.height(), 2);
    let deathtime = out.data.column("deathtime").unwrap().str().unwrap();
    assert_eq!(deathtime.get(0), None);
    assert_eq!(deathtime.get(1), Some("2153-09-08 19:10:00"));

    let language = out.data.column("language").unwrap().str().unwrap();
    assert_eq!(language.get(0), Some("Unknown"));
    assert_eq!(language.get(1), Some("ENGL"));
    assert!(out.labels("language").unwrap().contains("Unknown"));

    let edregtime = out.data.column("edregtime").unwrap().str().unwrap();
    assert_eq!(edregtime.get(0), Some(SENTINEL_TIMESTAMP));
    assert_eq!(edregtime.get(1), Some("2153-09-03 06:00:00"));

    assert_eq!(
        out.data.column("hospital_expire_flag").unwrap().dtype(),
        &DataType::Boolean
    );
    assert_eq!(out.data.column("hadm_id").unwrap().dtype(), &DataType::Int64);
    assert_eq!(out.column_type("admission_type"), Some(ColumnType::Categorical));
}

#[test]
fn admissions_rejects_unparseable_admit_time() {
    let dir = TempDir::new().unwrap();
    let table = load_admissions(
        &dir,
        &["21,22,165315,last tuesday,2196-04-10 15:54:00,,EMERGENCY,A,B,Private,ENGL,X,MARRIED,\
           WHITE,,,DX,0,1"],
    );
    let spec = builtin_spec("ADMISSIONS").unwrap();
    let err = clean_table(&table, &spec).unwrap_err();
    match err {
        TransformError::Format { column, row, value } => {
            assert_eq!(column, "admittime");
            assert_eq!(row, 0);
            assert_eq!(value, "last tuesday");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn labevents_fills_missing_valuenum_with_minus_one() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "LABEVENTS.csv",
        "row_id,subject_id,hadm_id,itemid,charttime,value,valuenum,valueuom,flag\n\
         281,3,,50820,2101-10-12 16:07:00,7.39,7.39,units,\n\
         282,3,145834,50800,not recorded,ART,,,abnormal\n",
    );
    let table = load(&path, &IngestOptions::default()).unwrap();
    let out = clean_table(&table, &builtin_spec("LABEVENTS").unwrap()).unwrap();

    let valuenum = out.data.column("valuenum").unwrap().f64().unwrap();
    assert_eq!(valuenum.get(0), Some(7.39));
    assert_eq!(valuenum.get(1), Some(-1.0));

    let hadm = out.data.column("hadm_id").unwrap().i64().unwrap();
    assert_eq!(hadm.get(0), Some(-1));

    let charttime = out.data.column("charttime").unwrap().str().unwrap();
    assert_eq!(charttime.get(1), Some(SENTINEL_TIMESTAMP));

    let flag = out.data.column("flag").unwrap().str().unwrap();
    assert_eq!(flag.get(0), Some("Normal"));
    let valueuom = out.data.column("valueuom").unwrap().str().unwrap();
    assert_eq!(valueuom.get(1), Some("Unknown"));
}

#[test]
fn labevents_rejects_non_numeric_valuenum() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "LABEVENTS.csv",
        "row_id,subject_id,hadm_id,itemid,charttime,value,valuenum,valueuom,flag\n\
         281,3,1,50820,2101-10-12 16:07:00,HIGH,HIGH,units,\n",
    );
    let table = load(&path, &IngestOptions::default()).unwrap();
    let err = clean_table(&table, &builtin_spec("LABEVENTS").unwrap()).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Type {
            expected: ColumnType::Numeric,
            ..
        }
    ));
}

#[test]
fn callout_drops_unused_columns() {
    let spec = builtin_spec("CALLOUT").unwrap();
    let mut header: Vec<String> = spec.drop.clone();
    header.extend(spec.columns.iter().map(|c| c.name.clone()));
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "CALLOUT.csv", &format!("{}\n", header.join(",")));

    let table = load(&path, &IngestOptions::default()).unwrap();
    let out = clean_table(&table, &spec).unwrap();
    assert_eq!(out.height(), 0);
    assert!(!out.has_column("submit_careunit"));
    assert!(!out.has_column("currentreservationtime"));
    assert_eq!(out.width(), spec.columns.len());
}

#[test]
fn cleaning_twice_yields_the_same_table() {
    let dir = TempDir::new().unwrap();
    let table = load_admissions(
        &dir,
        &["21,22,165315,2196-04-09T12:26:00,2196-04-10 15:54,,EMERGENCY,A,B,Private,,X,,WHITE,,,DX,0,1"],
    );
    let spec = builtin_spec("ADMISSIONS").unwrap();
    let first = clean_table(&table, &spec).unwrap();
    let second = clean_table(&table, &spec).unwrap();
    assert!(first.data.equals_missing(&second.data));
}

fn null_mask(table: &Table, column: &str) -> Vec<bool> {
    table
        .data
        .column(column)
        .unwrap()
        .is_null()
        .into_no_null_iter()
        .collect()
}

#[test]
fn columns_without_fill_keep_their_null_positions() {
    let dir = TempDir::new().unwrap();
    let table = load_admissions(
        &dir,
        &[
            "21,22,165315,2196-04-09 12:26:00,2196-04-10 15:54:00,,EMERGENCY,A,B,Private,,X,,WHITE,,,DX,0,1",
            "22,23,152223,2153-09-03 07:15:00,2153-09-08 19:10:00,2153-09-08 19:10:00,ELECTIVE,A,B,\
             Medicare,ENGL,CATHOLIC,,WHITE,,,CAD,1,1",
            "23,24,161859,2124-03-22 11:00:00,2124-03-30 13:00:00,,URGENT,A,B,Medicaid,,,SINGLE,\
             BLACK,,,CHF,0,1",
        ],
    );
    let spec = builtin_spec("ADMISSIONS").unwrap();
    let out = clean_table(&table, &spec).unwrap();

    let unfilled: Vec<&str> = spec
        .columns
        .iter()
        .filter(|c| c.fill.is_none())
        .map(|c| c.name.as_str())
        .collect();
    assert!(unfilled.contains(&"deathtime"));
    for column in unfilled {
        assert_eq!(
            null_mask(&table, column),
            null_mask(&out, column),
            "null positions moved in {column}"
        );
    }
    assert_eq!(null_mask(&out, "deathtime"), vec![true, false, true]);
}

#[test]
fn blank_lines_in_raw_export_add_no_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "LABEVENTS.csv",
        "row_id,subject_id,hadm_id,itemid,charttime,value,valuenum,valueuom,flag\n\
         281,3,1,50820,2101-10-12 16:07:00,7.39,7.39,units,\n\
         \n\
         282,3,1,50800,2101-10-12 18:17:00,ART,,,abnormal\n\
         \n",
    );
    let table = load(&path, &IngestOptions::default()).unwrap();
    let out = clean_table(&table, &builtin_spec("LABEVENTS").unwrap()).unwrap();

    assert_eq!(out.height(), 2);
    let row_id = out.data.column("row_id").unwrap().i64().unwrap();
    assert_eq!(row_id.get(0), Some(281));
    assert_eq!(row_id.get(1), Some(282));
    assert_eq!(out.data.column("valuenum").unwrap().null_count(), 0);
}
