//! Error types for statement ingestion

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("No columns to parse from file")]
    Empty,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Faltan columnas obligatorias: {}", list_repr(missing))]
    MissingColumns {
        missing: Vec<String>,
        /// Header cells as read from the file
        detected: Vec<String>,
    },

    #[error("Los totales exceden el rango numérico ({field})")]
    TotalOverflow { field: &'static str },
}

impl IngestError {
    /// Header cells of the file when the schema check failed
    pub fn detected_columns(&self) -> Option<&[String]> {
        match self {
            IngestError::MissingColumns { detected, .. } => Some(detected.as_slice()),
            _ => None,
        }
    }

    /// Schema failures are reported as-is; everything else is a parse failure.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, IngestError::MissingColumns { .. })
    }
}

/// Render names the way they are listed to the user: ['fecha', 'monto']
fn list_repr(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("[{}]", quoted.join(", "))
}

pub type Result<T> = std::result::Result<T, IngestError>;
