use std::path::{Path, PathBuf};

use plotters::prelude::*;
use polars::prelude::DataFrame;

use crate::error::{PipelineError, Result};
use crate::models::SummaryKind;
use crate::services::aggregator;

pub const Y_AXIS_LABEL: &str = "Listing Count";

pub fn chart_title(top_n: usize) -> String {
    format!("Top {} Chicago Neighbourhoods by Active Listings", top_n)
}

/// Distinct listing counts for the `top_n` busiest neighbourhoods.
pub fn top_neighbourhoods(df: &DataFrame, top_n: usize) -> Result<Vec<(String, u32)>> {
    let summary = aggregator::compute_summary(df, SummaryKind::ListingsByNeighbourhood)?;
    let rows = aggregator::summary_rows(&summary, SummaryKind::ListingsByNeighbourhood)?;

    Ok(rows
        .into_iter()
        .take(top_n)
        .map(|(name, count)| (name, count as u32))
        .collect())
}

/// Renders the top-N bar chart as SVG at `path`. Returns the written path,
/// or `None` when there is nothing to plot.
pub fn render_top_neighbourhoods(df: &DataFrame, top_n: usize, path: &Path) -> Result<Option<PathBuf>> {
    let bars = top_neighbourhoods(df, top_n)?;
    if bars.is_empty() {
        tracing::warn!("No neighbourhoods to plot, skipping chart");
        return Ok(None);
    }

    draw_bar_chart(&bars, &chart_title(top_n), path).map_err(|e| PipelineError::Chart(e.to_string()))?;

    tracing::info!("Chart with {} bars saved to {}", bars.len(), path.display());
    Ok(Some(path.to_path_buf()))
}

fn draw_bar_chart(
    bars: &[(String, u32)],
    title: &str,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let max_count = bars.iter().map(|(_, count)| *count).max().unwrap_or(0);
    // headroom above the tallest bar
    let y_max = max_count + max_count / 10 + 1;

    let root = SVGBackend::new(path, (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(120)
        .y_label_area_size(70)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0u32..y_max)?;

    let label_for = |segment: &SegmentValue<usize>| match segment {
        SegmentValue::CenterOf(idx) => bars.get(*idx).map(|(name, _)| name.clone()).unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&label_for)
        .x_desc("Neighbourhood")
        .y_desc(Y_AXIS_LABEL)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(8)
            .data(bars.iter().enumerate().map(|(idx, (_, count))| (idx, *count))),
    )?;

    root.present()?;
    Ok(())
}
