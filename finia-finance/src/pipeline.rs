//! One pass from CSV bytes to an analysis: load, normalize, categorize,
//! aggregate, recommend.

use std::io::Read;
use std::path::Path;

use finia_core::{categorize_transaction, AnalysisResult, CategorizedTransaction};
use finia_ingest::{load_csv, load_csv_path, normalize, CleanTable, IngestError, RawTable};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::Aggregator;
use crate::recommendation::recommend;

/// Full output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Header cells as they appeared in the uploaded file
    pub detected_columns: Vec<String>,
    pub table: CleanTable,
    /// One entry per row of `table`, same order
    pub categorized: Vec<CategorizedTransaction>,
    pub result: AnalysisResult,
}

/// Categorize and summarize an already-cleaned table. Fails when the
/// amounts sum past the range of `f64`.
pub fn analyze_table(
    table: &CleanTable,
) -> finia_ingest::Result<(Vec<CategorizedTransaction>, AnalysisResult)> {
    let categorized: Vec<CategorizedTransaction> = table
        .transactions()
        .cloned()
        .map(categorize_transaction)
        .collect();

    let totals = Aggregator::totals(&categorized);
    if let Some(field) = totals.overflowed_field() {
        return Err(IngestError::TotalOverflow { field });
    }
    let top_category = Aggregator::top_category(&totals.per_category_expense);
    let recommendation = recommend(top_category.as_ref());

    debug!(
        rows = categorized.len(),
        categories = totals.per_category_expense.len(),
        top = ?top_category.map(|t| t.category),
        "analysis complete"
    );

    let result = AnalysisResult {
        total_income: totals.total_income,
        total_expense: totals.total_expense,
        balance: totals.balance,
        suggested_savings: totals.suggested_savings,
        per_category_expense: totals.per_category_expense,
        top_category,
        recommendation,
    };

    Ok((categorized, result))
}

/// Normalize and analyze a loaded table.
pub fn analyze_raw(raw: &RawTable) -> finia_ingest::Result<Analysis> {
    let table = normalize(raw)?;
    let (categorized, result) = analyze_table(&table)?;
    Ok(Analysis {
        detected_columns: raw.headers.clone(),
        table,
        categorized,
        result,
    })
}

/// Analyze CSV bytes from any reader.
pub fn analyze_reader<R: Read>(reader: R) -> finia_ingest::Result<Analysis> {
    analyze_raw(&load_csv(reader)?)
}

/// Analyze a CSV file on disk.
pub fn analyze_path(path: impl AsRef<Path>) -> finia_ingest::Result<Analysis> {
    analyze_raw(&load_csv_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finia_core::Category;

    #[test]
    fn test_categorized_rows_align_with_table() {
        let data = "fecha,descripcion,monto\n2026-01-01,Uber,-10\nmal,Jumbo,-5\n2026-01-02,Luz,-7\n";
        let analysis = analyze_reader(data.as_bytes()).unwrap();
        assert_eq!(analysis.table.rows.len(), analysis.categorized.len());
        let cats: Vec<_> = analysis.categorized.iter().map(|c| c.category).collect();
        assert_eq!(cats, [Category::Transport, Category::Home]);
    }

    #[test]
    fn test_detected_columns_are_raw() {
        let data = " Fecha,DESCRIPCION,Monto \n2026-01-01,Uber,-10\n";
        let analysis = analyze_reader(data.as_bytes()).unwrap();
        assert_eq!(analysis.detected_columns, [" Fecha", "DESCRIPCION", "Monto "]);
        assert_eq!(analysis.table.columns, ["fecha", "descripcion", "monto"]);
    }

    #[test]
    fn test_schema_failure_stops_before_analysis() {
        let err = analyze_reader("fecha,descripcion\n2026-01-01,Uber\n".as_bytes()).unwrap_err();
        assert!(err.is_schema_error());
        assert_eq!(err.detected_columns().unwrap(), ["fecha", "descripcion"]);
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        let data = "fecha,descripcion,monto\n2026-01-01,Sueldo,1e308\n2026-01-02,Bono,1e308\n";
        let err = analyze_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::TotalOverflow { field: "total_income" }));
        assert!(!err.is_schema_error());
    }
}
