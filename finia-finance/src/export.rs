//! CSV exports: the categorized statement and the example template.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finia_core::{format_iso_date, Transaction};
use finia_ingest::{CleanTable, COL_AMOUNT, COL_CATEGORY, COL_DATE, COL_DESCRIPTION};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::pipeline::Analysis;

pub const DEFAULT_ANALYSIS_FILE: &str = "analisis_finIA.csv";
pub const DEFAULT_TEMPLATE_FILE: &str = "ejemplo_transacciones.csv";

/// Rows of the example statement offered when nothing was uploaded
const TEMPLATE_ROWS: [((i32, u32, u32), &str, f64); 5] = [
    ((2026, 1, 1), "Sueldo enero", 500000.0),
    ((2026, 1, 2), "Supermercado Dia", -15000.0),
    ((2026, 1, 3), "Uber al trabajo", -3200.0),
    ((2026, 1, 5), "Netflix mensual", -4999.0),
    ((2026, 1, 6), "Spotify", -3999.0),
];

/// The five example transactions.
pub fn template_transactions() -> Vec<Transaction> {
    TEMPLATE_ROWS
        .iter()
        .filter_map(|&((y, m, d), desc, amount)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| Transaction::new(date, desc, amount))
        })
        .collect()
}

/// Shortest decimal form of an amount: 500000, -12.5
pub fn format_amount(amount: f64) -> String {
    format!("{amount}")
}

/// Write the example statement (fecha, descripcion, monto).
pub fn write_template_csv<W: Write>(writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([COL_DATE, COL_DESCRIPTION, COL_AMOUNT])?;
    for t in template_transactions() {
        wtr.write_record([
            format_iso_date(t.date),
            t.description.clone(),
            format_amount(t.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Header of the enriched export and the index the category lands in.
/// An existing `categoria` column is reused, otherwise one is appended.
fn enriched_header(table: &CleanTable) -> (Vec<String>, usize) {
    let mut header = table.columns.clone();
    match header.iter().position(|c| c == COL_CATEGORY) {
        Some(i) => (header, i),
        None => {
            header.push(COL_CATEGORY.to_string());
            let i = header.len() - 1;
            (header, i)
        }
    }
}

/// Write the cleaned, categorized table: every original column plus
/// `categoria`. Dates and amounts are written in canonical form.
pub fn write_enriched_csv<W: Write>(analysis: &Analysis, writer: W) -> Result<()> {
    let table = &analysis.table;
    let (header, category_idx) = enriched_header(table);

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&header)?;

    for (row, categorized) in table.rows.iter().zip(&analysis.categorized) {
        let mut fields = row.fields.clone();
        fields.resize(header.len(), String::new());
        fields[table.required.date] = format_iso_date(row.transaction.date);
        fields[table.required.amount] = format_amount(row.transaction.amount);
        fields[category_idx] = categorized.category.label().to_string();
        wtr.write_record(&fields)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save the enriched table to a file.
pub fn save_enriched_csv(analysis: &Analysis, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_enriched_csv(analysis, file).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = analysis.table.rows.len(), "saved analysis csv");
    Ok(())
}

/// Save the example statement to a file.
pub fn save_template_csv(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_template_csv(file).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "saved template csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze_reader;

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_template_csv() {
        let out = to_string(|b| write_template_csv(b));
        assert_eq!(
            out,
            "fecha,descripcion,monto\n\
             2026-01-01,Sueldo enero,500000\n\
             2026-01-02,Supermercado Dia,-15000\n\
             2026-01-03,Uber al trabajo,-3200\n\
             2026-01-05,Netflix mensual,-4999\n\
             2026-01-06,Spotify,-3999\n"
        );
    }

    #[test]
    fn test_enriched_appends_category_and_keeps_extras() {
        let data = "Fecha,Descripcion,Monto,Cuenta\n05/01/2026,Netflix mensual,-4999.50,Visa\nbad,Uber,-1,Visa\n";
        let analysis = analyze_reader(data.as_bytes()).unwrap();
        let out = to_string(|b| write_enriched_csv(&analysis, b));
        assert_eq!(
            out,
            "fecha,descripcion,monto,cuenta,categoria\n\
             2026-01-05,Netflix mensual,-4999.5,Visa,Entretenimiento\n"
        );
    }

    #[test]
    fn test_existing_category_column_overwritten() {
        let data = "fecha,descripcion,monto,categoria\n2026-01-01,Uber,-10,Otros\n";
        let analysis = analyze_reader(data.as_bytes()).unwrap();
        let out = to_string(|b| write_enriched_csv(&analysis, b));
        assert_eq!(out, "fecha,descripcion,monto,categoria\n2026-01-01,Uber,-10,Transporte\n");
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TEMPLATE_FILE);
        save_template_csv(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("fecha,descripcion,monto\n"));
        assert_eq!(written.lines().count(), 6);
    }

    #[test]
    fn test_save_into_missing_dir_fails_with_context() {
        let analysis = analyze_reader("fecha,descripcion,monto\n".as_bytes()).unwrap();
        let err = save_enriched_csv(&analysis, "/no/such/dir/out.csv").unwrap_err();
        assert!(err.to_string().contains("/no/such/dir/out.csv"));
    }
}
