use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;

use super::types::ColumnKind;
use super::utils::*;
use crate::error::{PipelineError, Result};

/// Reads one named sheet of a workbook into a DataFrame, header row first.
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<DataFrame> {
    tracing::info!("Opening workbook {}", path.display());
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names().to_vec();
    tracing::debug!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    if !sheet_names.iter().any(|name| name == sheet_name) {
        return Err(PipelineError::MissingSheet {
            sheet: sheet_name.to_string(),
            available: sheet_names,
        });
    }

    let range = workbook.worksheet_range(sheet_name)?;
    let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();

    tracing::info!("Read {} rows from sheet {}", rows.len(), sheet_name);
    rows_to_dataframe(sheet_name, &rows)
}

pub fn rows_to_dataframe(sheet_name: &str, rows: &[Vec<Data>]) -> Result<DataFrame> {
    let header_row = rows
        .first()
        .filter(|row| row.iter().any(|cell| !is_null_cell(cell)))
        .ok_or_else(|| PipelineError::EmptySheet(sheet_name.to_string()))?;

    let mut existing_names = HashSet::new();
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(cell, idx, &mut existing_names))
        .collect();

    let mut columns = Vec::with_capacity(headers.len());

    for (col_idx, header) in headers.iter().enumerate() {
        let values: Vec<Data> = rows.iter()
            .skip(1) // header
            .map(|row| row.get(col_idx).cloned().unwrap_or(Data::Empty))
            .collect();

        let series = match detect_column_type(&values) {
            ColumnKind::Integer => {
                let ints: Vec<Option<i64>> = values.iter().map(cell_as_i64).collect();
                Series::new(header, ints)
            }
            ColumnKind::Float => {
                let floats: Vec<Option<f64>> = values.iter().map(cell_as_f64).collect();
                Series::new(header, floats)
            }
            ColumnKind::Text => {
                let strings: Vec<Option<String>> = values.iter().map(cell_as_text).collect();
                Series::new(header, strings)
            }
        };

        columns.push(series);
    }

    Ok(DataFrame::new(columns)?)
}
