//! Column cleaning rules.
//!
//! Each rule works on one column of one row and never looks at other rows.
//! [`clean_record`] applies all of them and derives `last_contact_date`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CleanError, CleanResult};
use crate::models::{CleanRecord, MarketingRecord, PreviousOutcome};

/// Year every last contact happened in.
pub const DEFAULT_CONTACT_YEAR: i32 = 2022;

/// Format the composed `{year}-{Month}-{day}` string is parsed with.
const CONTACT_DATE_FORMAT: &str = "%Y-%b-%d";

/// Placeholder the dataset uses for a missing education level.
const UNKNOWN_EDUCATION: &str = "unknown";

/// What to do with a token outside a boolean column's mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UnmappedPolicy {
    /// Abort the run.
    #[default]
    Fail,
    /// Leave the cell empty and count it.
    Null,
}

/// Parameters of the cleaning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    pub year: i32,
    pub unmapped: UnmappedPolicy,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            year: DEFAULT_CONTACT_YEAR,
            unmapped: UnmappedPolicy::Fail,
        }
    }
}

/// Counters collected while cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    /// Education values replaced by null.
    pub education_nulled: usize,
    /// Unmapped boolean cells left empty, per column.
    pub unmapped_nulled: BTreeMap<String, usize>,
}

// =============================================================================
// Column rules
// =============================================================================

/// Remove every `.` from a job title.
pub fn clean_job(job: &str) -> String {
    job.replace('.', "")
}

/// Replace `.` with `_`; the `unknown` placeholder becomes `None`.
pub fn clean_education(education: &str) -> Option<String> {
    let cleaned = education.replace('.', "_");
    if cleaned == UNKNOWN_EDUCATION {
        None
    } else {
        Some(cleaned)
    }
}

/// `yes` → true, `no` → false.
pub fn map_yes_no(token: &str) -> Option<bool> {
    match token.trim() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// `success` → true, `failure` / `nonexistent` → false.
pub fn map_previous_outcome(token: &str) -> Option<bool> {
    PreviousOutcome::from_token(token).map(PreviousOutcome::is_success)
}

/// Upper-case the first letter and lower-case the rest (`may` → `May`).
pub fn capitalize_month(month: &str) -> String {
    let mut chars = month.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Compose `{year}-{Month}-{day}` and parse it as a calendar date.
///
/// Returns the composed text alongside the parse error so callers can
/// report exactly what failed.
pub fn last_contact_date(year: i32, month: &str, day: &str) -> Result<NaiveDate, (String, String)> {
    let composed = format!("{}-{}-{}", year, capitalize_month(month), day.trim());
    NaiveDate::parse_from_str(&composed, CONTACT_DATE_FORMAT).map_err(|e| (composed, e.to_string()))
}

// =============================================================================
// Row cleaning
// =============================================================================

struct RowContext<'a> {
    line: u64,
    options: &'a CleanOptions,
}

impl RowContext<'_> {
    /// Apply the unmapped-value policy to the outcome of a token map.
    fn resolve(
        &self,
        mapped: Option<bool>,
        column: &str,
        value: &str,
        stats: &mut CleanStats,
    ) -> CleanResult<Option<bool>> {
        match (mapped, self.options.unmapped) {
            (Some(b), _) => Ok(Some(b)),
            (None, UnmappedPolicy::Null) => {
                *stats.unmapped_nulled.entry(column.to_string()).or_default() += 1;
                Ok(None)
            }
            (None, UnmappedPolicy::Fail) => Err(CleanError::UnmappedValue {
                line: self.line,
                column: column.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Clean one input row.
///
/// `line` is the 1-based file line of the row and only appears in errors.
pub fn clean_record(
    record: &MarketingRecord,
    line: u64,
    options: &CleanOptions,
    stats: &mut CleanStats,
) -> CleanResult<CleanRecord> {
    let ctx = RowContext { line, options };

    let education = clean_education(&record.education);
    if education.is_none() {
        stats.education_nulled += 1;
    }

    let credit_default = ctx.resolve(
        map_yes_no(&record.credit_default),
        "credit_default",
        &record.credit_default,
        stats,
    )?;
    let mortgage = ctx.resolve(map_yes_no(&record.mortgage), "mortgage", &record.mortgage, stats)?;
    let previous_outcome = ctx.resolve(
        map_previous_outcome(&record.previous_outcome),
        "previous_outcome",
        &record.previous_outcome,
        stats,
    )?;
    let campaign_outcome = ctx.resolve(
        map_yes_no(&record.campaign_outcome),
        "campaign_outcome",
        &record.campaign_outcome,
        stats,
    )?;

    let last_contact_date = last_contact_date(options.year, &record.month, &record.day).map_err(
        |(value, message)| CleanError::InvalidDate {
            line,
            value,
            message,
        },
    )?;

    Ok(CleanRecord {
        client_id: record.client_id,
        age: record.age,
        job: clean_job(&record.job),
        marital: record.marital.clone(),
        education,
        credit_default,
        mortgage,
        contact_duration: record.contact_duration,
        number_contacts: record.number_contacts,
        previous_campaign_contacts: record.previous_campaign_contacts,
        previous_outcome,
        campaign_outcome,
        last_contact_date,
        cons_price_idx: record.cons_price_idx,
        euribor_three_months: record.euribor_three_months,
    })
}

/// Clean every row, stopping at the first error.
///
/// `lines[i]` is the file line of `records[i]`; a missing entry falls back
/// to `i + 2` (header on line 1).
pub fn clean_records(
    records: &[MarketingRecord],
    lines: &[u64],
    options: &CleanOptions,
) -> CleanResult<(Vec<CleanRecord>, CleanStats)> {
    let mut stats = CleanStats::default();
    let cleaned = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let line = lines.get(i).copied().unwrap_or(i as u64 + 2);
            clean_record(record, line, options, &mut stats)
        })
        .collect::<CleanResult<Vec<_>>>()?;

    Ok((cleaned, stats))
}
