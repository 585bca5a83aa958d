//! Turns the raw listings sheet into the cleaned table.
//!
//! The steps run in a fixed order: dedup on `id`, drop rows missing a
//! neighbourhood or price, normalize headers, parse prices, then coerce
//! `availability_365`. Running the cleaner on its own output is a no-op.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::models::{columns, CleaningReport};
use crate::services::excel::normalize_column_name;

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9.]").expect("static pattern is valid")
});

pub fn clean_listings(raw: &DataFrame) -> Result<(DataFrame, CleaningReport)> {
    let mut report = CleaningReport {
        rows_in: raw.height(),
        ..Default::default()
    };
    info!("Cleaning {} raw rows", raw.height());

    // 1. Deduplicate on id, first occurrence wins
    let subset = vec![find_column(raw, columns::ID)?];
    let df = raw.unique_stable(Some(subset.as_slice()), UniqueKeepStrategy::First, None)?;
    report.duplicates_removed = raw.height() - df.height();
    debug!("Removed {} duplicate ids", report.duplicates_removed);

    // 2. Drop rows missing a neighbourhood or a price
    let required = [
        find_column(&df, columns::NEIGHBOURHOOD)?,
        find_column(&df, columns::PRICE)?,
    ];
    let before = df.height();
    let mut df = df.drop_nulls(Some(required.as_slice()))?;
    report.null_rows_dropped = before - df.height();
    debug!("Dropped {} rows with null neighbourhood or price", report.null_rows_dropped);

    // 3. Normalize headers
    let names = normalized_names(&df)?;
    df.set_column_names(names.as_slice())?;

    // 4. Price
    let price = parse_price_column(df.column(columns::PRICE)?)?;
    df.with_column(price)?;

    // 5. Availability, only when present
    if df.column(columns::AVAILABILITY_365).is_ok() {
        let (availability, coerced) = coerce_availability(df.column(columns::AVAILABILITY_365)?)?;
        df.with_column(availability)?;
        report.availability_coerced = coerced;
        if coerced > 0 {
            warn!("Coerced {} {} values to 0", coerced, columns::AVAILABILITY_365);
        }
    }

    report.rows_out = df.height();
    info!(
        "Cleaning finished: {} rows in, {} duplicates, {} null rows, {} rows out",
        report.rows_in, report.duplicates_removed, report.null_rows_dropped, report.rows_out
    );

    Ok((df, report))
}

/// Finds the raw column whose normalized name is `target`.
fn find_column(df: &DataFrame, target: &str) -> Result<String> {
    df.get_column_names()
        .into_iter()
        .find(|name| normalize_column_name(name) == target)
        .map(|name| name.to_string())
        .ok_or_else(|| PipelineError::MissingColumn(target.to_string()))
}

fn normalized_names(df: &DataFrame) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    df.get_column_names()
        .into_iter()
        .map(|name| {
            let normalized = normalize_column_name(name);
            if seen.insert(normalized.clone()) {
                Ok(normalized)
            } else {
                Err(PipelineError::DuplicateColumn(normalized))
            }
        })
        .collect()
}

/// Strips everything except digits and `.` and parses what is left.
/// `None` when nothing numeric remains.
pub fn parse_price(raw: &str) -> Option<f64> {
    let stripped = NON_NUMERIC.replace_all(raw, "");
    if !stripped.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    stripped.parse::<f64>().ok()
}

fn parse_price_column(series: &Series) -> Result<Series> {
    match series.dtype() {
        DataType::String => {
            let values = series
                .str()?
                .into_iter()
                .enumerate()
                .map(|(row, value)| match value {
                    Some(raw) => parse_price(raw)
                        .map(Some)
                        .ok_or_else(|| PipelineError::MalformedPrice {
                            row,
                            value: raw.to_string(),
                        }),
                    None => Ok(None),
                })
                .collect::<Result<Vec<Option<f64>>>>()?;
            Ok(Series::new(columns::PRICE, values))
        }
        dtype if dtype.is_numeric() => {
            // A sign is a non-numeric character like any other
            let floats = series.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = floats
                .f64()?
                .into_iter()
                .map(|value| value.map(f64::abs))
                .collect();
            Ok(Series::new(columns::PRICE, values))
        }
        _ => parse_price_column(&series.cast(&DataType::String)?),
    }
}

/// Returns the coerced column and how many values had to default to 0.
fn coerce_availability(series: &Series) -> Result<(Series, usize)> {
    let parsed: Vec<Option<f64>> = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|value| value.and_then(|raw| raw.trim().parse::<f64>().ok()))
            .collect(),
        _ => series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .collect(),
    };

    let mut coerced = 0;
    let values: Vec<i64> = parsed
        .into_iter()
        .map(|value| match value {
            Some(days) if days.is_finite() && days >= 0.0 => days.trunc() as i64,
            _ => {
                coerced += 1;
                0
            }
        })
        .collect();

    Ok((Series::new(columns::AVAILABILITY_365, values), coerced))
}
