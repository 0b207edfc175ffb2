//! # campaign-split - bank marketing dataset splitter
//!
//! Cleans a flat bank-marketing CSV and splits it into three tables ready
//! for database loading: `client.csv`, `campaign.csv` and `economics.csv`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│   Clean     │────▶│   Split     │──▶ 3 CSV files
//! │ (auto-enc)  │     │ (columns)   │     │ (per column)│     │ (checked)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campaign_split::{run, SplitOptions};
//!
//! let report = run(&SplitOptions::default()).unwrap();
//! println!("Split {} rows", report.row_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Input row, cleaned row and output tables
//! - [`parser`] - CSV reading with auto-detection
//! - [`transform`] - Cleaning rules, split and pipeline
//! - [`validation`] - Split integrity checks
//! - [`writer`] - Atomic output writing
//! - [`logs`] - Progress logging helpers

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Output
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CleanError, CsvError, PipelineError, SplitError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Campaign, CleanRecord, Client, Economics, MarketingRecord, OutputTable, PreviousOutcome,
    SplitTables, INPUT_COLUMNS,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, format_delimiter, inspect_bytes,
    inspect_file, missing_columns, parse_bytes, parse_file, Inspection, ParseResult,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    clean_record, clean_records, rejoin, split_records, CleanOptions, CleanStats, UnmappedPolicy,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{run, run_bytes, write_report, SplitOptions, SplitReport, DEFAULT_INPUT};

// =============================================================================
// Re-exports - Validation & Output
// =============================================================================

pub use validation::{is_valid_split, verify_split};
pub use writer::{write_table, write_tables, WrittenFiles};
