use std::collections::HashSet;

use calamine::Data;

use super::types::ColumnKind;

/// Canonical column name: trimmed, lower-cased, spaces to underscores,
/// parentheses removed.
pub fn normalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect()
}

/// Header cell text as read from the sheet. Blank cells get a positional
/// name and repeats get a numeric suffix so every column name is unique.
pub fn header_name(cell: &Data, idx: usize, existing_names: &mut HashSet<String>) -> String {
    let text = match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    };

    let base_name = if text.trim().is_empty() {
        format!("column_{}", idx)
    } else {
        text
    };

    let mut name = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(name.clone()) {
        name = format!("{}_{}", base_name, counter);
        counter += 1;
    }

    name
}

pub fn detect_column_type(values: &[Data]) -> ColumnKind {
    let mut non_empty = 0;
    let mut all_integral = true;

    for value in values.iter().filter(|v| !is_null_cell(v)) {
        non_empty += 1;
        match value {
            Data::Int(_) => {}
            Data::Float(f) => {
                if f.fract() != 0.0 || !f.is_finite() || f.abs() > i64::MAX as f64 {
                    all_integral = false;
                }
            }
            _ => return ColumnKind::Text,
        }
    }

    match (non_empty, all_integral) {
        (0, _) => ColumnKind::Text,
        (_, true) => ColumnKind::Integer,
        (_, false) => ColumnKind::Float,
    }
}

pub fn is_null_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn cell_as_i64(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) => Some(*f as i64),
        _ => None,
    }
}

pub fn cell_as_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        _ => None,
    }
}

pub fn cell_as_text(cell: &Data) -> Option<String> {
    if is_null_cell(cell) {
        None
    } else {
        Some(cell.to_string())
    }
}
