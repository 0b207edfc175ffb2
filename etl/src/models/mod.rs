//! Domain models for the campaign-split pipeline.
//!
//! - [`MarketingRecord`] - one raw row of the flat input file
//! - [`CleanRecord`] - the same row after every cleaning rule ran
//! - [`Client`], [`Campaign`], [`Economics`] - the three output projections
//! - [`SplitTables`] - the three projections together
//! - [`OutputTable`] - file name and column layout of an output row type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Columns the input file must provide, in their canonical order.
pub const INPUT_COLUMNS: &[&str] = &[
    "client_id",
    "age",
    "job",
    "marital",
    "education",
    "credit_default",
    "mortgage",
    "month",
    "day",
    "contact_duration",
    "number_contacts",
    "previous_campaign_contacts",
    "previous_outcome",
    "campaign_outcome",
    "cons_price_idx",
    "euribor_three_months",
];

// =============================================================================
// Input
// =============================================================================

/// One row of the flat marketing dataset, as read from disk.
///
/// Categorical and yes/no columns stay textual here; the cleaning rules in
/// [`crate::transform::clean`] turn them into their typed form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketingRecord {
    pub client_id: i64,
    pub age: u32,
    pub job: String,
    pub marital: String,
    pub education: String,
    pub credit_default: String,
    pub mortgage: String,
    pub month: String,
    /// Day of month, zero-padded or not.
    pub day: String,
    pub contact_duration: u32,
    pub number_contacts: u32,
    pub previous_campaign_contacts: u32,
    pub previous_outcome: String,
    pub campaign_outcome: String,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

// =============================================================================
// Previous Outcome
// =============================================================================

/// Result of the previous marketing campaign for a client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreviousOutcome {
    Success,
    Failure,
    /// The client was not contacted in a previous campaign.
    Nonexistent,
}

impl PreviousOutcome {
    /// Parse the dataset token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "nonexistent" => Some(Self::Nonexistent),
            _ => None,
        }
    }

    /// Only a successful previous campaign counts as `true`.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

// =============================================================================
// Cleaned Row
// =============================================================================

/// A marketing row after cleaning, before it is split.
///
/// Boolean columns are `None` only when the unmapped-value policy is `Null`
/// and the input token was outside its mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub client_id: i64,
    pub age: u32,
    pub job: String,
    pub marital: String,
    pub education: Option<String>,
    pub credit_default: Option<bool>,
    pub mortgage: Option<bool>,
    pub contact_duration: u32,
    pub number_contacts: u32,
    pub previous_campaign_contacts: u32,
    pub previous_outcome: Option<bool>,
    pub campaign_outcome: Option<bool>,
    pub last_contact_date: NaiveDate,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

// =============================================================================
// Output Tables
// =============================================================================

/// Layout of one output CSV.
///
/// `COLUMNS` must list the serialized field names in declaration order; the
/// writer emits it as the header row so empty tables still carry one.
pub trait OutputTable: Serialize {
    /// Short table name used in logs and errors.
    const NAME: &'static str;
    /// File name inside the output directory.
    const FILE_NAME: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Shared key linking the three tables.
    fn client_id(&self) -> i64;
}

/// Demographic and financial fields of a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub client_id: i64,
    pub age: u32,
    pub job: String,
    pub marital: String,
    pub education: Option<String>,
    pub credit_default: Option<bool>,
    pub mortgage: Option<bool>,
}

impl OutputTable for Client {
    const NAME: &'static str = "client";
    const FILE_NAME: &'static str = "client.csv";
    const COLUMNS: &'static [&'static str] = &[
        "client_id",
        "age",
        "job",
        "marital",
        "education",
        "credit_default",
        "mortgage",
    ];

    fn client_id(&self) -> i64 {
        self.client_id
    }
}

/// Interaction fields of the current and previous campaigns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub client_id: i64,
    pub number_contacts: u32,
    pub contact_duration: u32,
    pub previous_campaign_contacts: u32,
    pub previous_outcome: Option<bool>,
    pub campaign_outcome: Option<bool>,
    /// Serialized as `YYYY-MM-DD`.
    pub last_contact_date: NaiveDate,
}

impl OutputTable for Campaign {
    const NAME: &'static str = "campaign";
    const FILE_NAME: &'static str = "campaign.csv";
    const COLUMNS: &'static [&'static str] = &[
        "client_id",
        "number_contacts",
        "contact_duration",
        "previous_campaign_contacts",
        "previous_outcome",
        "campaign_outcome",
        "last_contact_date",
    ];

    fn client_id(&self) -> i64 {
        self.client_id
    }
}

/// Economic indicators at contact time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Economics {
    pub client_id: i64,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

impl OutputTable for Economics {
    const NAME: &'static str = "economics";
    const FILE_NAME: &'static str = "economics.csv";
    const COLUMNS: &'static [&'static str] =
        &["client_id", "cons_price_idx", "euribor_three_months"];

    fn client_id(&self) -> i64 {
        self.client_id
    }
}

/// The three projections of one cleaned dataset, row-aligned by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitTables {
    pub clients: Vec<Client>,
    pub campaigns: Vec<Campaign>,
    pub economics: Vec<Economics>,
}

impl SplitTables {
    /// Number of rows in the client table.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
