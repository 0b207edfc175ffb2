//! Integrity checks on split tables before anything is written.
//!
//! The three outputs are only joined through `client_id`, so they must agree
//! row by row:
//!
//! - every table has exactly one row per input row
//! - the client at row `i` is the same in all three tables
//! - no client appears twice

use std::collections::HashSet;

use crate::error::{SplitError, SplitResult};
use crate::models::{Campaign, Client, Economics, OutputTable, SplitTables};

/// Check that `tables` is a lossless, duplicate-free split of `expected_rows`
/// input rows.
pub fn verify_split(tables: &SplitTables, expected_rows: usize) -> SplitResult<()> {
    check_len::<Client>(&tables.clients, expected_rows)?;
    check_len::<Campaign>(&tables.campaigns, expected_rows)?;
    check_len::<Economics>(&tables.economics, expected_rows)?;

    let mut seen = HashSet::with_capacity(expected_rows);
    for (row, client) in tables.clients.iter().enumerate() {
        let id = client.client_id();
        if !seen.insert(id) {
            return Err(SplitError::DuplicateClientId(id));
        }
        check_key(&tables.campaigns[row], row, id)?;
        check_key(&tables.economics[row], row, id)?;
    }

    Ok(())
}

/// Returns `true` if [`verify_split`] passes.
pub fn is_valid_split(tables: &SplitTables, expected_rows: usize) -> bool {
    verify_split(tables, expected_rows).is_ok()
}

fn check_len<T: OutputTable>(rows: &[T], expected: usize) -> SplitResult<()> {
    if rows.len() == expected {
        Ok(())
    } else {
        Err(SplitError::RowCountMismatch {
            table: T::NAME,
            expected,
            actual: rows.len(),
        })
    }
}

fn check_key<T: OutputTable>(row: &T, index: usize, expected: i64) -> SplitResult<()> {
    if row.client_id() == expected {
        Ok(())
    } else {
        Err(SplitError::KeyMismatch {
            table: T::NAME,
            row: index,
            expected,
            actual: row.client_id(),
        })
    }
}
