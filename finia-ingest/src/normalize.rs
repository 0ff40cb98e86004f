//! Schema normalizer: canonical column names, required-column check, and
//! best-effort coercion of `fecha` and `monto`.
//!
//! Rows whose date or amount cannot be read are dropped without failing the
//! upload; only the counts are kept.

use finia_core::{parse_flexible_date, Transaction};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::types::{
    CleanRow, CleanTable, DropReport, RawTable, RequiredColumns, COL_AMOUNT, COL_DATE,
    COL_DESCRIPTION, REQUIRED_COLUMNS,
};

/// Plain decimal literal: optional sign, digits with optional fraction,
/// optional exponent. No grouping separators or currency symbols.
const AMOUNT_PATTERN: &str = r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$";

/// Lower-case and trim a header cell.
pub fn normalize_column_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn position_of(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c == name)
}

/// Locate the required columns among the normalized `columns`, or list the
/// ones that are absent alongside the raw `headers`.
pub fn find_required(columns: &[String], headers: &[String]) -> Result<RequiredColumns> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| position_of(columns, name).is_none())
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            missing,
            detected: headers.to_vec(),
        });
    }

    Ok(RequiredColumns {
        date: position_of(columns, COL_DATE).unwrap_or_default(),
        description: position_of(columns, COL_DESCRIPTION).unwrap_or_default(),
        amount: position_of(columns, COL_AMOUNT).unwrap_or_default(),
    })
}

fn parse_amount(raw: &str, amount_re: &Regex) -> Option<f64> {
    let s = raw.trim();
    if !amount_re.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Clean a raw table into typed rows.
pub fn normalize(raw: &RawTable) -> Result<CleanTable> {
    let columns: Vec<String> = raw.headers.iter().map(|h| normalize_column_name(h)).collect();
    let required = find_required(&columns, &raw.headers)?;
    let amount_re = Regex::new(AMOUNT_PATTERN)?;

    let mut rows = Vec::with_capacity(raw.rows.len());
    let mut dropped = DropReport::default();

    for fields in &raw.rows {
        let cell = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

        let date = match parse_flexible_date(cell(required.date)) {
            Some(d) => d,
            None => {
                dropped.bad_date += 1;
                continue;
            }
        };

        let amount = match parse_amount(cell(required.amount), &amount_re) {
            Some(a) => a,
            None => {
                dropped.bad_amount += 1;
                continue;
            }
        };

        rows.push(CleanRow {
            transaction: Transaction::new(date, cell(required.description), amount),
            fields: fields.clone(),
        });
    }

    if !dropped.is_empty() {
        warn!(
            bad_date = dropped.bad_date,
            bad_amount = dropped.bad_amount,
            "dropped rows that could not be parsed"
        );
    }
    debug!(kept = rows.len(), "normalized table");

    Ok(CleanTable {
        columns,
        required,
        rows,
        dropped,
    })
}
