use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::Result;

/// Writes `df` as a comma-separated file with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;

    tracing::info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(path.to_path_buf())
}
