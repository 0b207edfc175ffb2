//! Project cleaned marketing rows into the three output tables.
//!
//! ```text
//! Cleaned rows                         Client     │ Campaign          │ Economics
//! ┌──────────────────────────────┐     ┌────────┐ ┌───────────────┐ ┌───────────┐
//! │ id 1, age, job, …, cpi, eur  │  →  │ id 1 … │ │ id 1 … date   │ │ id 1 cpi  │
//! │ id 2, age, job, …, cpi, eur  │     │ id 2 … │ │ id 2 … date   │ │ id 2 cpi  │
//! └──────────────────────────────┘     └────────┘ └───────────────┘ └───────────┘
//! ```
//!
//! No row is filtered: each table has one row per cleaned row, in input order.

use std::collections::HashMap;

use crate::models::{Campaign, CleanRecord, Client, Economics, SplitTables};

/// Split cleaned rows into client, campaign and economics tables.
pub fn split_records(records: Vec<CleanRecord>) -> SplitTables {
    let mut tables = SplitTables {
        clients: Vec::with_capacity(records.len()),
        campaigns: Vec::with_capacity(records.len()),
        economics: Vec::with_capacity(records.len()),
    };

    for record in records {
        tables.campaigns.push(Campaign {
            client_id: record.client_id,
            number_contacts: record.number_contacts,
            contact_duration: record.contact_duration,
            previous_campaign_contacts: record.previous_campaign_contacts,
            previous_outcome: record.previous_outcome,
            campaign_outcome: record.campaign_outcome,
            last_contact_date: record.last_contact_date,
        });
        tables.economics.push(Economics {
            client_id: record.client_id,
            cons_price_idx: record.cons_price_idx,
            euribor_three_months: record.euribor_three_months,
        });
        tables.clients.push(Client {
            client_id: record.client_id,
            age: record.age,
            job: record.job,
            marital: record.marital,
            education: record.education,
            credit_default: record.credit_default,
            mortgage: record.mortgage,
        });
    }

    tables
}

/// Join the three tables back on `client_id`, in client table order.
///
/// Clients without a matching campaign and economics row are left out.
pub fn rejoin(tables: &SplitTables) -> Vec<CleanRecord> {
    let campaigns: HashMap<i64, &Campaign> =
        tables.campaigns.iter().map(|c| (c.client_id, c)).collect();
    let economics: HashMap<i64, &Economics> =
        tables.economics.iter().map(|e| (e.client_id, e)).collect();

    tables
        .clients
        .iter()
        .filter_map(|client| {
            let campaign = campaigns.get(&client.client_id)?;
            let econ = economics.get(&client.client_id)?;
            Some(CleanRecord {
                client_id: client.client_id,
                age: client.age,
                job: client.job.clone(),
                marital: client.marital.clone(),
                education: client.education.clone(),
                credit_default: client.credit_default,
                mortgage: client.mortgage,
                contact_duration: campaign.contact_duration,
                number_contacts: campaign.number_contacts,
                previous_campaign_contacts: campaign.previous_campaign_contacts,
                previous_outcome: campaign.previous_outcome,
                campaign_outcome: campaign.campaign_outcome,
                last_contact_date: campaign.last_contact_date,
                cons_price_idx: econ.cons_price_idx,
                euribor_three_months: econ.euribor_three_months,
            })
        })
        .collect()
}
