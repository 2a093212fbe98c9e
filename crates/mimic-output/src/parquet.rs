//! Parquet writer.

use std::fs::{self, File};
use std::path::Path;

use mimic_model::ColumnType;
use mimic_transform::Table;
use polars::prelude::{
    DataFrame, DataType, FrozenCategories, ParquetCompression, ParquetWriter, StatisticsOptions,
};
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// Rows per row group; fixed so repeated exports produce identical files.
const ROW_GROUP_SIZE: usize = 512 * 1024;

/// Build the frame that is written.
///
/// Every categorical column becomes an enum whose categories are exactly the
/// column's label set, fill label included. A value outside the label set is
/// a [`OutputError::Prepare`] error.
pub fn to_export_frame(table: &Table) -> Result<DataFrame> {
    let mut df = table.data.clone();
    for column in table.column_names() {
        if table.column_type(&column) != Some(ColumnType::Categorical) {
            continue;
        }
        let labels = table.labels(&column).cloned().unwrap_or_default();
        let prepare = |source| OutputError::Prepare {
            table: table.name.clone(),
            column: column.clone(),
            source,
        };
        let categories =
            FrozenCategories::new(labels.iter().map(String::as_str)).map_err(prepare)?;
        let dtype = DataType::from_frozen_categories(categories);
        let cast = df
            .column(&column)
            .and_then(|col| col.strict_cast(&dtype))
            .map_err(prepare)?;
        df.with_column(cast).map_err(prepare)?;
        debug!(table = %table.name, column = %column, labels = labels.len(), "enum column");
    }
    Ok(df)
}

/// Write a table to `destination` as Parquet.
///
/// Parent directories are created. An existing file is replaced in full;
/// a failed write leaves the destination in an undefined state.
pub fn export(table: &Table, destination: &Path) -> Result<()> {
    let io_error = |source| OutputError::Io {
        path: destination.to_path_buf(),
        source,
    };
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut df = to_export_frame(table)?;
    let file = File::create(destination).map_err(io_error)?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .with_statistics(StatisticsOptions::full())
        .with_row_group_size(Some(ROW_GROUP_SIZE))
        .finish(&mut df)
        .map_err(|source| OutputError::Parquet {
            path: destination.to_path_buf(),
            source,
        })?;

    info!(
        table = %table.name,
        path = %destination.display(),
        rows = df.height(),
        columns = df.width(),
        "exported table"
    );
    Ok(())
}
