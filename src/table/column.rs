//! Multi-row header flattening.
use crate::spreadsheet::cell::CellValue;
use std::collections::{HashMap, HashSet};

/// Placeholder name for a column without any header text (0-based index).
pub fn placeholder_name(index: usize) -> String {
    format!("col_{}", index)
}

/// Synthesizes `col_0 .. col_{width-1}` for blocks without header rows.
pub fn synthetic_names(width: usize) -> Vec<String> {
    (0..width).map(placeholder_name).collect()
}

/// Flattens one or more header rows into unique column names.
///
/// Each row is padded to the widest row and forward-filled independently;
/// then every column joins its non-empty parts top to bottom with
/// `separator`. With `drop_repeated`, a part equal to the previously kept
/// part of the same column is skipped. Duplicate names get a ` (k)` suffix
/// from the second occurrence on.
pub fn flatten_header(header_rows: &[Vec<CellValue>], separator: &str, drop_repeated: bool) -> Vec<String> {
    let width = header_rows.iter().map(Vec::len).max().unwrap_or(0);
    let filled: Vec<Vec<CellValue>> = header_rows
        .iter()
        .map(|row| forward_fill(row, width))
        .collect();

    let names = (0..width).map(|col| {
        let mut parts: Vec<String> = Vec::new();
        for row in &filled {
            let part = row[col].to_string().trim().to_owned();
            if part.is_empty() {
                continue;
            }
            if drop_repeated && parts.last() == Some(&part) {
                continue;
            }
            parts.push(part);
        }
        if parts.is_empty() {
            placeholder_name(col)
        } else {
            parts.join(separator)
        }
    });
    make_unique(names)
}

/// Pads the row to `width` and replaces each empty cell with the nearest preceding non-empty one.
fn forward_fill(row: &[CellValue], width: usize) -> Vec<CellValue> {
    let mut filled = Vec::with_capacity(width);
    let mut last = CellValue::Empty;
    for col in 0..width {
        match row.get(col) {
            Some(value) if !value.is_empty() => {
                last = value.clone();
                filled.push(value.clone());
            }
            _ => filled.push(last.clone()),
        }
    }
    filled
}

/// Appends ` (k)` to repeated names, k counting occurrences from 2.
fn make_unique(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::new();
    for name in names {
        let count = occurrences.entry(name.clone()).or_insert(0);
        *count += 1;
        let mut candidate = name.clone();
        if *count > 1 || seen.contains(&candidate) {
            let mut k = (*count).max(2);
            candidate = format!("{} ({})", name, k);
            while seen.contains(&candidate) {
                k += 1;
                candidate = format!("{} ({})", name, k);
            }
            *count = k;
        }
        seen.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}
