//! High-level pipeline API: read, clean, split, check and write.
//!
//! # Example
//!
//! ```rust,ignore
//! use campaign_split::{run, SplitOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run(&SplitOptions::default())?;
//!     println!("Split {} clients", report.row_count);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PipelineError, PipelineResult};
use crate::logs::{
    log_error, log_info, log_info_indent, log_success, log_success_indent, log_warning,
};
use crate::parser::{format_delimiter, parse_bytes, parse_file, ParseResult};
use crate::transform::clean::{clean_records, CleanOptions, CleanStats};
use crate::transform::split::split_records;
use crate::validation::verify_split;
use crate::writer::{write_tables, WrittenFiles};

/// Input file the batch job reads when nothing else is configured.
pub const DEFAULT_INPUT: &str = "bank_marketing.csv";

/// Options for the split pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    /// Marketing CSV to read
    pub input: PathBuf,

    /// Directory receiving client.csv, campaign.csv and economics.csv
    pub output_dir: PathBuf,

    /// Input delimiter (auto-detect if None)
    pub delimiter: Option<char>,

    /// Cleaning parameters
    pub clean: CleanOptions,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            delimiter: None,
            clean: CleanOptions::default(),
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    /// Source file, if the input came from disk
    pub input: Option<PathBuf>,
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    /// Input rows, equal to the row count of every output table
    pub row_count: usize,
    pub client_rows: usize,
    pub campaign_rows: usize,
    pub economics_rows: usize,
    pub clean_stats: CleanStats,
    pub outputs: WrittenFiles,
}

/// Run the batch job on the configured input file.
pub fn run(options: &SplitOptions) -> PipelineResult<SplitReport> {
    log_info(format!("📖 Reading {}...", options.input.display()));
    let result = parse_file(&options.input, options.delimiter)
        .map_err(PipelineError::from)
        .and_then(|parsed| split_parsed(parsed, options, Some(&options.input)));
    log_failure(result)
}

/// Same as [`run`] but reads the CSV from memory instead of `options.input`.
pub fn run_bytes(bytes: &[u8], options: &SplitOptions) -> PipelineResult<SplitReport> {
    let result = parse_bytes(bytes, options.delimiter)
        .map_err(PipelineError::from)
        .and_then(|parsed| split_parsed(parsed, options, None));
    log_failure(result)
}

fn log_failure(result: PipelineResult<SplitReport>) -> PipelineResult<SplitReport> {
    if let Err(ref e) = result {
        log_error(format!("Run aborted: {}", e));
    }
    result
}

fn split_parsed(
    parse_result: ParseResult,
    options: &SplitOptions,
    source_path: Option<&Path>,
) -> PipelineResult<SplitReport> {
    log_success(format!("Detected encoding: {}", parse_result.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(parse_result.delimiter)));
    log_success(format!("Read {} rows", parse_result.records.len()));

    if parse_result.records.is_empty() {
        log_warning("Input has no data rows, writing header-only tables");
    }

    // Step 1: clean
    log_info(format!("🧹 Cleaning columns (contact year {})...", options.clean.year));
    let (cleaned, clean_stats) =
        clean_records(&parse_result.records, &parse_result.lines, &options.clean)?;
    log_success(format!("Cleaned {} rows", cleaned.len()));
    if clean_stats.education_nulled > 0 {
        log_info_indent(
            format!("{} unknown education values set to null", clean_stats.education_nulled),
            1,
        );
    }
    for (column, count) in &clean_stats.unmapped_nulled {
        log_warning(format!("{} unmapped '{}' values set to null", count, column));
    }

    // Step 2: split
    log_info("✂️  Splitting into client, campaign and economics...");
    let row_count = cleaned.len();
    let tables = split_records(cleaned);
    verify_split(&tables, row_count)?;
    log_success(format!("{} rows per table", tables.len()));

    // Step 3: write
    log_info(format!("💾 Writing tables to {}...", options.output_dir.display()));
    let outputs = write_tables(&tables, &options.output_dir)?;
    for path in [&outputs.client, &outputs.campaign, &outputs.economics] {
        log_success_indent(path.display().to_string(), 1);
    }

    Ok(SplitReport {
        input: source_path.map(Path::to_path_buf),
        encoding: parse_result.encoding,
        delimiter: parse_result.delimiter,
        headers: parse_result.headers,
        row_count,
        client_rows: tables.clients.len(),
        campaign_rows: tables.campaigns.len(),
        economics_rows: tables.economics.len(),
        clean_stats,
        outputs,
    })
}

/// Write `report` as pretty JSON to `path`.
pub fn write_report(report: &SplitReport, path: &Path) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| PipelineError::Write(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "client_id,age,job,marital,education,credit_default,mortgage,month,day,contact_duration,number_contacts,previous_campaign_contacts,previous_outcome,campaign_outcome,cons_price_idx,euribor_three_months
0,56,housemaid,married,basic.4y,no,no,may,13,261,1,0,nonexistent,no,93.994,4.857
1,57,admin.,married,unknown,no,yes,may,19,149,1,0,success,yes,93.994,4.857
";

    #[test]
    fn test_default_options() {
        let opts = SplitOptions::default();
        assert_eq!(opts.input, PathBuf::from("bank_marketing.csv"));
        assert_eq!(opts.output_dir, PathBuf::from("."));
        assert_eq!(opts.clean.year, 2022);
        assert!(opts.delimiter.is_none());
    }

    #[test]
    fn test_run_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions {
            output_dir: dir.path().to_path_buf(),
            ..SplitOptions::default()
        };

        let report = run_bytes(CSV.as_bytes(), &options).unwrap();

        assert_eq!(report.row_count, 2);
        assert_eq!(report.client_rows, 2);
        assert_eq!(report.campaign_rows, 2);
        assert_eq!(report.economics_rows, 2);
        assert_eq!(report.clean_stats.education_nulled, 1);
        assert!(report.input.is_none());

        let client = std::fs::read_to_string(&report.outputs.client).unwrap();
        assert!(client.contains("1,57,admin,married,,false,true"));
    }

    #[test]
    fn test_header_only_writes_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions {
            output_dir: dir.path().to_path_buf(),
            ..SplitOptions::default()
        };
        let header = CSV.lines().next().unwrap();

        let report = run_bytes(header.as_bytes(), &options).unwrap();

        assert_eq!(report.row_count, 0);
        assert_eq!(report.client_rows, 0);
        assert_eq!(report.campaign_rows, 0);
        assert_eq!(report.economics_rows, 0);
        assert_eq!(
            std::fs::read_to_string(&report.outputs.client).unwrap(),
            "client_id,age,job,marital,education,credit_default,mortgage\n"
        );
        assert_eq!(
            std::fs::read_to_string(&report.outputs.economics).unwrap(),
            "client_id,cons_price_idx,euribor_three_months\n"
        );
        assert!(std::fs::read_to_string(&report.outputs.campaign)
            .unwrap()
            .starts_with("client_id,number_contacts,"));
    }

    #[test]
    fn test_failure_is_returned_after_logging() {
        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions {
            output_dir: dir.path().to_path_buf(),
            ..SplitOptions::default()
        };

        let err = run_bytes(b"client_id,age\n1,30\n", &options).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Csv(crate::error::CsvError::MissingColumns(_))
        ));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions {
            output_dir: dir.path().to_path_buf(),
            ..SplitOptions::default()
        };
        let report = run_bytes(CSV.as_bytes(), &options).unwrap();
        let path = dir.path().join("report.json");

        write_report(&report, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["row_count"], 2);
        assert_eq!(json["delimiter"], ",");
    }
}
