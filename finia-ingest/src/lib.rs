//! finia-ingest: CSV statement loading and schema normalization.

pub mod error;
pub mod loader;
pub mod normalize;
pub mod types;

pub use error::{IngestError, Result};
pub use loader::{load_csv, load_csv_path};
pub use normalize::{normalize, normalize_column_name};
pub use types::{
    CleanRow, CleanTable, DropReport, RawTable, RequiredColumns, COL_AMOUNT, COL_CATEGORY,
    COL_DATE, COL_DESCRIPTION, REQUIRED_COLUMNS,
};
