use std::collections::BTreeMap;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{columns, SummaryKind, TOP_HOSTS_LIMIT};

/// Computes every summary whose input columns exist in `df`.
pub fn compute_summaries(df: &DataFrame) -> Result<BTreeMap<SummaryKind, DataFrame>> {
    let mut summaries = BTreeMap::new();

    for kind in SummaryKind::ALL {
        if let Some(missing) = kind
            .required_columns()
            .iter()
            .find(|name| df.column(name).is_err())
        {
            debug!("Skipping {}: column {} not present", kind.name(), missing);
            continue;
        }

        let summary = compute_summary(df, kind)?;
        debug!("{} has {} groups", kind.name(), summary.height());
        summaries.insert(kind, summary);
    }

    info!("Computed {} of {} summaries", summaries.len(), SummaryKind::ALL.len());
    Ok(summaries)
}

/// Groups by the summary's key in first-appearance order and sorts the
/// value column descending with a stable sort, so ties keep that order.
pub fn compute_summary(df: &DataFrame, kind: SummaryKind) -> Result<DataFrame> {
    let key = kind.key_column();
    let value = kind.value_column();

    let aggregation = match kind {
        SummaryKind::ListingsByNeighbourhood => col(columns::ID).drop_nulls().n_unique(),
        SummaryKind::ReviewsByRoomType => col(columns::NUMBER_OF_REVIEWS).cast(DataType::Int64).sum(),
        SummaryKind::TopHostsRevenue => col(columns::ESTIMATED_REVENUE).cast(DataType::Float64).sum(),
        SummaryKind::AvgPriceByPropertyType => col(columns::PRICE).cast(DataType::Float64).mean(),
    };

    let mut lazy = df
        .clone()
        .lazy()
        .filter(col(key).is_not_null())
        .group_by_stable([col(key)])
        .agg([aggregation.alias(value)])
        .sort(
            value,
            SortOptions {
                descending: true,
                nulls_last: true,
                multithreaded: false,
                maintain_order: true,
            },
        );

    if kind == SummaryKind::TopHostsRevenue {
        lazy = lazy.limit(TOP_HOSTS_LIMIT);
    }

    Ok(lazy.collect()?)
}

/// Flattens a summary into `(key, value)` pairs in table order.
pub fn summary_rows(summary: &DataFrame, kind: SummaryKind) -> Result<Vec<(String, f64)>> {
    let keys = summary.column(kind.key_column())?.cast(&DataType::String)?;
    let values = summary.column(kind.value_column())?.cast(&DataType::Float64)?;

    let rows = keys
        .str()?
        .into_iter()
        .zip(values.f64()?.into_iter())
        .map(|(key, value)| (key.unwrap_or_default().to_string(), value.unwrap_or(0.0)))
        .collect();

    Ok(rows)
}
