use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Args;
use crate::data::filter::{FilteredView, MonthFilter};
use crate::data::loader::load_dataset;
use crate::data::model::{PassengerDataset, PassengerRecord};
use crate::data::stats::{
    extreme_months, summarize, yearly_totals, ExtremeMonths, Summary, YearTotal,
};

// ---------------------------------------------------------------------------
// Headless report
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one selection.
#[derive(Debug, Serialize)]
pub struct DashboardReport<'a> {
    pub source: &'a str,
    pub year: i32,
    pub month: &'a MonthFilter,
    pub summary: Option<Summary>,
    pub yearly_totals: Vec<YearTotal>,
    pub extremes: Option<ExtremeMonths>,
    pub rows: Vec<&'a PassengerRecord>,
}

impl<'a> DashboardReport<'a> {
    pub fn build(dataset: &'a PassengerDataset, view: &'a FilteredView) -> Self {
        DashboardReport {
            source: dataset.source(),
            year: view.year,
            month: &view.month,
            summary: summarize(view.records(dataset)),
            yearly_totals: yearly_totals(dataset),
            extremes: extreme_months(dataset),
            rows: view.records(dataset).collect(),
        }
    }

    /// Plain-text rendering, metric values formatted like the dashboard.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DashboardReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Air Passenger Dashboard  ({})", self.source)?;
        writeln!(f, "Selection: {} / {}", self.year, self.month)?;
        writeln!(f)?;

        writeln!(f, "Key metrics")?;
        let (max, min, mean) = match &self.summary {
            Some(s) => (s.max.to_string(), s.min.to_string(), format!("{:.2}", s.mean)),
            None => ("–".into(), "–".into(), "–".into()),
        };
        writeln!(f, "  Highest passengers: {max}")?;
        writeln!(f, "  Lowest passengers:  {min}")?;
        writeln!(f, "  Average passengers: {mean}")?;
        writeln!(f)?;

        writeln!(f, "Yearly passenger counts")?;
        for t in &self.yearly_totals {
            writeln!(f, "  {}  {:>8}", t.year, t.total)?;
        }
        writeln!(f)?;

        if let Some(ex) = &self.extremes {
            writeln!(f, "Busiest month: {}", ex.busiest.name)?;
            writeln!(f, "Slowest month: {}", ex.slowest.name)?;
            writeln!(f)?;
        }

        writeln!(f, "{:<8} {:>10}", "Month", "Passengers")?;
        for r in &self.rows {
            writeln!(f, "{:<8} {:>10}", r.period_label(), r.passengers)?;
        }
        if self.rows.is_empty() {
            writeln!(f, "(no rows match this selection)")?;
        }
        Ok(())
    }
}

/// Load the configured source and print one report to stdout.
pub fn run(args: &Args) -> Result<()> {
    let source = args.data_source();
    let dataset = load_dataset(&source, &args.load_options())
        .with_context(|| format!("loading {source}"))?;
    log::info!("Loaded {} months from {source}", dataset.len());

    let year = args
        .year
        .or_else(|| dataset.years().first().copied())
        .context("dataset has no rows")?;
    let view = FilteredView::new(&dataset, year, args.month.clone());
    let report = DashboardReport::build(&dataset, &view);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample;

    #[test]
    fn text_report_for_one_month() {
        let ds = sample::dataset();
        let view = FilteredView::new(&ds, 1949, MonthFilter::named("July"));
        let text = DashboardReport::build(&ds, &view).render_text();
        assert!(text.contains("Selection: 1949 / July"));
        assert!(text.contains("Highest passengers: 148"));
        assert!(text.contains("Average passengers: 148.00"));
        assert!(text.contains("  1949      1520"));
        assert!(text.contains("Busiest month: July"));
        assert!(text.contains("Slowest month: November"));
        assert!(text.contains("1949-07         148"));
    }

    #[test]
    fn display_writes_into_any_formatter() {
        use std::fmt::Write as _;

        let ds = sample::dataset();
        let view = FilteredView::new(&ds, 1953, MonthFilter::All);
        let report = DashboardReport::build(&ds, &view);
        let mut out = String::from("> ");
        write!(out, "{report}").unwrap();
        assert_eq!(out.strip_prefix("> "), Some(report.render_text().as_str()));
        assert_eq!(out.lines().filter(|l| l.starts_with("1953-")).count(), 12);
    }

    #[test]
    fn empty_selection_renders_placeholders() {
        let ds = sample::dataset();
        let view = FilteredView::new(&ds, 1975, MonthFilter::All);
        let report = DashboardReport::build(&ds, &view);
        assert!(report.summary.is_none());
        let text = report.render_text();
        assert!(text.contains("Highest passengers: –"));
        assert!(text.contains("(no rows match this selection)"));
    }

    #[test]
    fn json_report_shape() {
        let ds = sample::dataset();
        let view = FilteredView::new(&ds, 1960, MonthFilter::All);
        let json = serde_json::to_value(DashboardReport::build(&ds, &view)).unwrap();
        assert_eq!(json["month"], "All");
        assert_eq!(json["summary"]["max"], 622);
        assert_eq!(json["summary"]["count"], 12);
        assert_eq!(json["yearly_totals"].as_array().unwrap().len(), 12);
        assert_eq!(json["yearly_totals"][0]["total"], 1520);
        assert_eq!(json["extremes"]["busiest"]["name"], "July");
        assert_eq!(json["rows"][0]["period"], "1960-01-01");
        assert_eq!(json["rows"][0]["month_name"], "January");

        let empty = FilteredView::new(&ds, 1960, MonthFilter::named("Nope"));
        let json = serde_json::to_value(DashboardReport::build(&ds, &empty)).unwrap();
        assert!(json["summary"].is_null());
    }
}
