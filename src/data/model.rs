use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::period::month_name;

// ---------------------------------------------------------------------------
// PassengerRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One month of passenger traffic, with calendar fields derived once at
/// load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerRecord {
    /// First day of the calendar month.
    pub period: NaiveDate,
    /// Passenger count.  Assumed non-negative but not enforced.
    pub passengers: i64,
    pub year: i32,
    /// 1 = January … 12 = December.
    pub month_number: u32,
    pub month_name: &'static str,
}

impl PassengerRecord {
    /// Build a record and derive its calendar fields.  Any day in the month
    /// is accepted; the stored `period` is the first of the month.
    pub fn new(period: NaiveDate, passengers: i64) -> Self {
        let month_number = period.month();
        PassengerRecord {
            period: period.with_day(1).unwrap_or(period),
            passengers,
            year: period.year(),
            month_number,
            month_name: month_name(month_number).unwrap_or("Unknown"),
        }
    }

    /// `YYYY-MM` label used by the table and reports.
    pub fn period_label(&self) -> String {
        self.period.format("%Y-%m").to_string()
    }
}

// ---------------------------------------------------------------------------
// PassengerDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The validated, immutable dataset with pre-computed selector options.
#[derive(Debug, Clone)]
pub struct PassengerDataset {
    source: String,
    records: Vec<PassengerRecord>,
    years: Vec<i32>,
    month_names: Vec<&'static str>,
}

impl PassengerDataset {
    /// Build selector indices from the loaded records.  Row order is kept
    /// exactly as given.
    pub fn from_records(source: impl Into<String>, records: Vec<PassengerRecord>) -> Self {
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();

        let mut month_names: Vec<&'static str> = Vec::new();
        for r in &records {
            if !month_names.contains(&r.month_name) {
                month_names.push(r.month_name);
            }
        }

        PassengerDataset {
            source: source.into(),
            records,
            years: years.into_iter().collect(),
            month_names,
        }
    }

    /// Where the data came from (URL or path).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Distinct month names in the order they first appear.
    pub fn month_names(&self) -> &[&'static str] {
        &self.month_names
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
