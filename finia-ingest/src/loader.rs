//! Read an uploaded CSV into a header-keyed table of strings.
//!
//! No cell is interpreted here; that is the normalizer's job. Structural
//! problems (bad UTF-8, no header, rows wider than the header) fail the
//! whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::types::RawTable;

/// Parse CSV bytes from any reader.
pub fn load_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::Empty);
    }

    let width = headers.len();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;

        // Blank line
        if record.len() == 1 && record.get(0).is_some_and(|c| c.trim().is_empty()) && width > 1 {
            continue;
        }

        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(IngestError::RaggedRow {
                line,
                expected: width,
                found: record.len(),
            });
        }

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    debug!(columns = width, rows = rows.len(), "loaded csv");
    Ok(RawTable { headers, rows })
}

/// Parse a CSV file from disk.
pub fn load_csv_path(path: impl AsRef<Path>) -> Result<RawTable> {
    let file = File::open(path.as_ref())?;
    load_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_headers_and_rows() {
        let data = "fecha,descripcion,monto\n2026-01-01,Sueldo enero,500000\n2026-01-02,Supermercado Dia,-15000\n";
        let table = load_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, ["fecha", "descripcion", "monto"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], ["2026-01-02", "Supermercado Dia", "-15000"]);
    }

    #[test]
    fn test_keeps_raw_header_spelling() {
        let data = " Fecha ,DESCRIPCION,Monto\n2026-01-01,x,1\n";
        let table = load_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, [" Fecha ", "DESCRIPCION", "Monto"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let data = "fecha,descripcion,monto\n2026-01-01,Solo descripcion\n";
        let table = load_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0], ["2026-01-01", "Solo descripcion", ""]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let data = "fecha,descripcion,monto\n\n2026-01-01,Uber,-100\n\n";
        let table = load_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_wide_row_fails() {
        let data = "fecha,descripcion,monto\n2026-01-01,Uber,-100,extra\n";
        let err = load_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::RaggedRow { expected: 3, found: 4, .. }));
    }

    #[test]
    fn test_empty_input_fails() {
        let err = load_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Empty));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let mut data = b"fecha,descripcion,monto\n2026-01-01,".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, 0xfd]);
        data.extend_from_slice(b",-100\n");
        let err = load_csv(data.as_slice()).unwrap_err();
        assert!(matches!(err, IngestError::Csv(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_csv_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
