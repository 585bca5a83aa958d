use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::models::{CleaningReport, CLEANED_FILE_NAME};
use crate::services::narrator::Highlights;
use crate::services::{aggregator, cleaner, loader, narrator, visualizer, writer};

#[derive(Debug)]
pub struct RunReport {
    pub cleaning: CleaningReport,
    pub files_written: Vec<PathBuf>,
    pub chart_path: Option<PathBuf>,
    pub highlights: Highlights,
}

/// Runs the whole batch once. Stops at the first error; files written
/// before that point stay on disk.
pub fn run(config: &Config) -> Result<RunReport> {
    let start = Instant::now();
    tracing::info!(
        "Starting run: input={}, sheet={}",
        config.input_path.display(),
        config.sheet_name
    );

    let raw = loader::load_listings(&config.input_path, &config.sheet_name)?;
    let (mut cleaned, cleaning) = cleaner::clean_listings(&raw)?;

    fs::create_dir_all(&config.output_dir)?;
    let mut files_written = Vec::new();
    files_written.push(writer::write_csv(
        &mut cleaned,
        &config.output_dir.join(CLEANED_FILE_NAME),
    )?);

    let summaries = aggregator::compute_summaries(&cleaned)?;
    for (kind, mut summary) in summaries {
        let path = config.output_dir.join(kind.file_name());
        files_written.push(writer::write_csv(&mut summary, &path)?);
    }

    let chart_path = visualizer::render_top_neighbourhoods(&cleaned, config.top_n, &config.chart_path())?;

    let highlights = narrator::build_highlights(&cleaned)?;
    println!("{}", highlights.render());

    tracing::info!(
        "Run finished in {:?}, wrote {} files",
        start.elapsed(),
        files_written.len()
    );

    Ok(RunReport {
        cleaning,
        files_written,
        chart_path,
        highlights,
    })
}
