//! Output CSV writer.
//!
//! All three tables are written to temporary files inside the output
//! directory first. They are renamed to their final names only once every
//! table has been flushed, so a failed run never leaves a mix of old and new
//! outputs behind.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::WriteResult;
use crate::models::{Campaign, Client, Economics, OutputTable, SplitTables};

/// Final paths of the written tables.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WrittenFiles {
    pub client: PathBuf,
    pub campaign: PathBuf,
    pub economics: PathBuf,
}

/// Serialize `rows` as CSV into `writer`, header first.
///
/// The header comes from [`OutputTable::COLUMNS`] so a table with no rows
/// still has one.
pub fn write_table<T: OutputTable, W: std::io::Write>(rows: &[T], writer: W) -> WriteResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(T::COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write one table into a fresh temp file in `dir`.
fn stage_table<T: OutputTable>(rows: &[T], dir: &Path) -> WriteResult<NamedTempFile> {
    let mut staged = tempfile::Builder::new()
        .prefix(&format!(".{}.", T::NAME))
        .suffix(".tmp")
        .tempfile_in(dir)?;
    write_table(rows, staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    Ok(staged)
}

fn persist(staged: NamedTempFile, dir: &Path, file_name: &str) -> WriteResult<PathBuf> {
    let path = dir.join(file_name);
    staged.persist(&path)?;
    Ok(path)
}

/// Write client.csv, campaign.csv and economics.csv into `dir`.
///
/// `dir` is created if missing. Existing outputs are replaced only after all
/// three new tables have been written successfully.
pub fn write_tables(tables: &SplitTables, dir: &Path) -> WriteResult<WrittenFiles> {
    std::fs::create_dir_all(dir)?;

    let client = stage_table(&tables.clients, dir)?;
    let campaign = stage_table(&tables.campaigns, dir)?;
    let economics = stage_table(&tables.economics, dir)?;

    Ok(WrittenFiles {
        client: persist(client, dir, Client::FILE_NAME)?,
        campaign: persist(campaign, dir, Campaign::FILE_NAME)?,
        economics: persist(economics, dir, Economics::FILE_NAME)?,
    })
}
