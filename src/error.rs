use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Sheet '{sheet}' not found in workbook (available: {available:?})")]
    MissingSheet { sheet: String, available: Vec<String> },

    #[error("Sheet '{0}' has no header row")]
    EmptySheet(String),

    #[error("Unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Malformed price at row {row}: '{value}' has no numeric content")]
    MalformedPrice { row: usize, value: String },

    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    #[error("Column name '{0}' appears more than once after normalization")]
    DuplicateColumn(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("DataFrame error: {0}")]
    DataFrameError(#[from] PolarsError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<calamine::Error> for PipelineError {
    fn from(err: calamine::Error) -> Self {
        PipelineError::Workbook(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
