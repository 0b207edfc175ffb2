//! Transformation module.
//!
//! - Clean: per-column cleaning rules and the derived contact date
//! - Split: projection into client, campaign and economics tables
//! - Pipeline: read, clean, split, check and write in one call

pub mod clean;
pub mod pipeline;
pub mod split;

pub use clean::{clean_record, clean_records, CleanOptions, CleanStats, UnmappedPolicy};
pub use pipeline::*;
pub use split::{rejoin, split_records};
