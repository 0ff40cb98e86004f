use finia_core::Transaction;
use serde::{Deserialize, Serialize};

pub const COL_DATE: &str = "fecha";
pub const COL_DESCRIPTION: &str = "descripcion";
pub const COL_AMOUNT: &str = "monto";
pub const COL_CATEGORY: &str = "categoria";

/// Columns every statement must carry, in reporting order
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_DATE, COL_DESCRIPTION, COL_AMOUNT];

/// A CSV file as read, before any cleaning
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTable {
    /// Header cells exactly as they appeared in the file
    pub headers: Vec<String>,
    /// Data rows, each padded to the header width
    pub rows: Vec<Vec<String>>,
}

/// Positions of the required columns inside a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredColumns {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

/// A row that survived cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRow {
    pub transaction: Transaction,
    /// Every cell of the original row, including unrecognized columns
    pub fields: Vec<String>,
}

/// Rows dropped during cleaning. A row is counted once, under the first
/// check it failed (date before amount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DropReport {
    pub bad_date: usize,
    pub bad_amount: usize,
}

impl DropReport {
    pub fn total(&self) -> usize {
        self.bad_date + self.bad_amount
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Output of the schema normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanTable {
    /// Lower-cased, trimmed column names
    pub columns: Vec<String>,
    pub required: RequiredColumns,
    pub rows: Vec<CleanRow>,
    pub dropped: DropReport,
}

impl CleanTable {
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.rows.iter().map(|r| &r.transaction)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
