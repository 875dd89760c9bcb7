use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::model::{PassengerDataset, PassengerRecord};

/// Selector label meaning "do not filter by month".
pub const ALL_MONTHS: &str = "All";

// ---------------------------------------------------------------------------
// Month selection
// ---------------------------------------------------------------------------

/// The month selector's value: the `All` sentinel or one month name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum MonthFilter {
    #[default]
    All,
    Named(String),
}

impl MonthFilter {
    pub fn named(name: impl Into<String>) -> Self {
        MonthFilter::Named(name.into())
    }

    fn matches(&self, record: &PassengerRecord) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Named(name) => record.month_name == name.as_str(),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_MONTHS {
            MonthFilter::All
        } else {
            MonthFilter::Named(s.to_string())
        })
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => write!(f, "{ALL_MONTHS}"),
            MonthFilter::Named(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Month selector entries: the sentinel followed by the month names in
/// the order they first appear in the data.
pub fn month_options(dataset: &PassengerDataset) -> Vec<MonthFilter> {
    std::iter::once(MonthFilter::All)
        .chain(dataset.month_names().iter().map(|m| MonthFilter::named(*m)))
        .collect()
}

// ---------------------------------------------------------------------------
// Filters – both return row indices into the dataset, in source order
// ---------------------------------------------------------------------------

/// Rows whose derived year equals `year`.  An absent year gives an empty
/// subset.
pub fn filter_by_year(dataset: &PassengerDataset, year: i32) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.year == year)
        .map(|(i, _)| i)
        .collect()
}

/// Narrow `subset` to one month name (exact, case-sensitive).  `All`
/// returns the subset unchanged.
pub fn filter_by_month(
    dataset: &PassengerDataset,
    subset: &[usize],
    month: &MonthFilter,
) -> Vec<usize> {
    let records = dataset.records();
    subset
        .iter()
        .copied()
        .filter(|&i| records.get(i).is_some_and(|r| month.matches(r)))
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// The rows matching one (year, month) selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub year: i32,
    pub month: MonthFilter,
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn new(dataset: &PassengerDataset, year: i32, month: MonthFilter) -> Self {
        let by_year = filter_by_year(dataset, year);
        let indices = filter_by_month(dataset, &by_year, &month);
        log::debug!("Filter {year}/{month}: {} of {} rows", indices.len(), dataset.len());
        FilteredView {
            year,
            month,
            indices,
        }
    }

    /// Iterate over the selected records.
    pub fn records<'a>(
        &'a self,
        dataset: &'a PassengerDataset,
    ) -> impl Iterator<Item = &'a PassengerRecord> + 'a {
        self.indices
            .iter()
            .filter_map(move |&i| dataset.records().get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn rec(y: i32, m: u32, p: i64) -> PassengerRecord {
        PassengerRecord::new(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), p)
    }

    fn dataset() -> PassengerDataset {
        PassengerDataset::from_records(
            "test",
            vec![
                rec(1949, 1, 112),
                rec(1949, 2, 118),
                rec(1950, 1, 115),
                rec(1950, 2, 126),
                rec(1951, 3, 178),
            ],
        )
    }

    #[test]
    fn year_filter_selects_only_that_year() {
        let ds = dataset();
        assert_eq!(filter_by_year(&ds, 1949), vec![0, 1]);
        assert_eq!(filter_by_year(&ds, 1951), vec![4]);
        assert!(filter_by_year(&ds, 1990).is_empty());
    }

    #[test]
    fn year_subsets_partition_the_dataset() {
        let ds = dataset();
        let mut seen: Vec<usize> = ds
            .years()
            .iter()
            .flat_map(|&y| {
                let idx = filter_by_year(&ds, y);
                assert!(idx.iter().all(|&i| ds.records()[i].year == y));
                idx
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn all_sentinel_is_identity() {
        let ds = dataset();
        let subset = vec![3, 0, 2];
        assert_eq!(filter_by_month(&ds, &subset, &MonthFilter::All), subset);
    }

    #[test]
    fn month_filter_is_exact_and_idempotent() {
        let ds = dataset();
        let all: Vec<usize> = (0..ds.len()).collect();
        let jan = MonthFilter::named("January");
        let once = filter_by_month(&ds, &all, &jan);
        assert_eq!(once, vec![0, 2]);
        assert_eq!(filter_by_month(&ds, &once, &jan), once);
        assert!(filter_by_month(&ds, &all, &MonthFilter::named("january")).is_empty());
        assert!(filter_by_month(&ds, &all, &MonthFilter::named("Smarch")).is_empty());
    }

    #[test]
    fn view_combines_year_and_month() {
        let ds = dataset();
        let view = FilteredView::new(&ds, 1950, MonthFilter::named("February"));
        assert_eq!(view.indices, vec![3]);
        let passengers: Vec<i64> = view.records(&ds).map(|r| r.passengers).collect();
        assert_eq!(passengers, vec![126]);

        let empty = FilteredView::new(&ds, 1951, MonthFilter::named("January"));
        assert!(empty.is_empty());
    }

    #[test]
    fn sentinel_round_trips_through_text() {
        assert_eq!("All".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "May".parse::<MonthFilter>().unwrap(),
            MonthFilter::named("May")
        );
        assert_eq!(MonthFilter::All.to_string(), "All");
    }

    #[test]
    fn month_options_start_with_sentinel() {
        let ds = dataset();
        assert_eq!(
            month_options(&ds),
            vec![
                MonthFilter::All,
                MonthFilter::named("January"),
                MonthFilter::named("February"),
                MonthFilter::named("March"),
            ]
        );
    }
}
