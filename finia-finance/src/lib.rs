//! finia-finance: aggregation, recommendation, exports and the analysis pipeline

pub mod aggregator;
pub mod export;
pub mod pie;
pub mod pipeline;
pub mod recommendation;

pub use aggregator::{Aggregator, Totals};
pub use export::{
    save_enriched_csv, save_template_csv, template_transactions, write_enriched_csv,
    write_template_csv, DEFAULT_ANALYSIS_FILE, DEFAULT_TEMPLATE_FILE,
};
pub use pie::{pie_slices, PieSlice, CHART_TITLE};
pub use pipeline::{analyze_path, analyze_raw, analyze_reader, analyze_table, Analysis};
pub use recommendation::recommend;
