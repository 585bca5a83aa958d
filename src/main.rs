use anyhow::Result;

use listings_pipeline::{config, logging, pipeline};

fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::load_config()?;

    let report = pipeline::run(&config)?;
    tracing::info!(
        "{} rows cleaned, {} files written",
        report.cleaning.rows_out,
        report.files_written.len()
    );

    Ok(())
}
