use polars::prelude::DataFrame;

use crate::error::Result;
use crate::models::SummaryKind;
use crate::services::aggregator;

const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct Highlight<T> {
    pub label: String,
    pub value: T,
}

/// The headline facts printed at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlights {
    pub busiest_neighbourhood: Option<Highlight<u64>>,
    /// Share of all reviews, in percent.
    pub favourite_room_type: Option<Highlight<f64>>,
    pub top_host: Option<Highlight<f64>>,
}

impl Highlights {
    pub fn render(&self) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut lines = vec![rule.clone()];

        if let Some(h) = &self.busiest_neighbourhood {
            lines.push(format!("• Most active neighbourhood: {} ({} listings)", h.label, h.value));
        }
        if let Some(h) = &self.favourite_room_type {
            lines.push(format!("• Favourite room type: {} ({:.1}% of all reviews)", h.label, h.value));
        }
        if let Some(h) = &self.top_host {
            lines.push(format!("• Top host by estimated revenue: {} (${:.2})", h.label, h.value));
        }

        lines.push(rule);
        lines.join("\n")
    }
}

pub fn build_highlights(df: &DataFrame) -> Result<Highlights> {
    let busiest_neighbourhood = first_row(df, SummaryKind::ListingsByNeighbourhood)?
        .map(|(label, count)| Highlight { label, value: count as u64 });

    let favourite_room_type = match summary(df, SummaryKind::ReviewsByRoomType)? {
        Some(rows) => {
            let total: f64 = rows.iter().map(|(_, reviews)| reviews).sum();
            rows.into_iter()
                .next()
                .filter(|_| total > 0.0)
                .map(|(label, reviews)| Highlight { label, value: reviews / total * 100.0 })
        }
        None => None,
    };

    let top_host = first_row(df, SummaryKind::TopHostsRevenue)?
        .map(|(label, revenue)| Highlight { label, value: revenue });

    Ok(Highlights {
        busiest_neighbourhood,
        favourite_room_type,
        top_host,
    })
}

/// Summary rows, or `None` when `df` lacks the summary's input columns.
fn summary(df: &DataFrame, kind: SummaryKind) -> Result<Option<Vec<(String, f64)>>> {
    if kind.required_columns().iter().any(|name| df.column(name).is_err()) {
        return Ok(None);
    }
    let table = aggregator::compute_summary(df, kind)?;
    Ok(Some(aggregator::summary_rows(&table, kind)?))
}

fn first_row(df: &DataFrame, kind: SummaryKind) -> Result<Option<(String, f64)>> {
    Ok(summary(df, kind)?.and_then(|rows| rows.into_iter().next()))
}
