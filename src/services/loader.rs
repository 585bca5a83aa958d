use std::path::Path;

use polars::prelude::*;

use crate::error::{PipelineError, Result};
use crate::services::excel::{self, WORKBOOK_EXTENSIONS};

/// Loads the raw listings table. Workbooks are read from `sheet_name`;
/// CSV files have a single table and ignore it.
pub fn load_listings(path: &Path, sheet_name: &str) -> Result<DataFrame> {
    if !path.exists() {
        tracing::error!("Input file {} does not exist", path.display());
        return Err(PipelineError::MissingFile(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    let df = match extension.as_str() {
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => excel::read_sheet(path, sheet_name)?,
        "csv" => {
            tracing::debug!("CSV input, ignoring sheet name {}", sheet_name);
            read_csv(path)?
        }
        _ => return Err(PipelineError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Every column is read as text; the cleaner and aggregator do the typing.
fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReader::from_path(path)?
        .has_header(true)
        .infer_schema(Some(0))
        .finish()?;
    Ok(df)
}
