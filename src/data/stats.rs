use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{PassengerDataset, PassengerRecord};

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Max / min / mean passenger count over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub max: i64,
    pub min: i64,
    pub mean: f64,
}

/// Summarise a subset.  `None` for an empty subset: the dashboard shows a
/// placeholder rather than an error.
pub fn summarize<'a, I>(records: I) -> Option<Summary>
where
    I: IntoIterator<Item = &'a PassengerRecord>,
{
    let mut count = 0usize;
    let mut max = i64::MIN;
    let mut min = i64::MAX;
    let mut sum = 0f64;
    for r in records {
        count += 1;
        max = max.max(r.passengers);
        min = min.min(r.passengers);
        sum += r.passengers as f64;
    }
    (count > 0).then(|| Summary {
        count,
        max,
        min,
        mean: sum / count as f64,
    })
}

// ---------------------------------------------------------------------------
// Whole-dataset aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    /// Summed in `i128`: any year of `i64` counts fits.
    pub total: i128,
}

/// Total passengers per year over the full dataset, ascending by year.
pub fn yearly_totals(dataset: &PassengerDataset) -> Vec<YearTotal> {
    let mut totals: BTreeMap<i32, i128> = BTreeMap::new();
    for r in dataset.records() {
        *totals.entry(r.year).or_default() += i128::from(r.passengers);
    }
    totals
        .into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthMean {
    pub month_number: u32,
    pub name: &'static str,
    pub mean: f64,
}

/// Mean passengers per month name across all years, in calendar order.
pub fn monthly_means(dataset: &PassengerDataset) -> Vec<MonthMean> {
    let mut groups: BTreeMap<u32, (&'static str, i128, usize)> = BTreeMap::new();
    for r in dataset.records() {
        let entry = groups.entry(r.month_number).or_insert((r.month_name, 0, 0));
        entry.1 += i128::from(r.passengers);
        entry.2 += 1;
    }
    groups
        .into_iter()
        .map(|(month_number, (name, sum, n))| MonthMean {
            month_number,
            name,
            mean: sum as f64 / n as f64,
        })
        .collect()
}

/// The months with the highest and lowest average traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtremeMonths {
    pub busiest: MonthMean,
    pub slowest: MonthMean,
}

/// Busiest and slowest month by mean.  Equal means resolve to the earlier
/// calendar month.  `None` only for an empty dataset.
pub fn extreme_months(dataset: &PassengerDataset) -> Option<ExtremeMonths> {
    let means = monthly_means(dataset);
    let first = *means.first()?;
    let (busiest, slowest) = means.iter().skip(1).fold((first, first), |(hi, lo), m| {
        (
            if m.mean > hi.mean { *m } else { hi },
            if m.mean < lo.mean { *m } else { lo },
        )
    });
    Some(ExtremeMonths { busiest, slowest })
}

/// Points for the trend line: x is the fractional year, y the passenger
/// count, in view order.
pub fn trend_series<'a, I>(records: I) -> Vec<[f64; 2]>
where
    I: IntoIterator<Item = &'a PassengerRecord>,
{
    records
        .into_iter()
        .map(|r| {
            let x = r.year as f64 + (r.month_number as f64 - 1.0) / 12.0;
            [x, r.passengers as f64]
        })
        .collect()
}
