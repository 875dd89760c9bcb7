use std::sync::Arc;

use crate::color::YearColors;
use crate::data::filter::{month_options, FilteredView, MonthFilter};
use crate::data::loader::{load_dataset, DataSource, LoadOptions};
use crate::data::model::PassengerDataset;
use crate::data::stats::{
    extreme_months, summarize, trend_series, yearly_totals, ExtremeMonths, Summary, YearTotal,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<PassengerDataset>>,

    /// Column names used when the user opens another file.
    pub load_options: LoadOptions,

    /// Selector entries, cached from the dataset.
    pub year_options: Vec<i32>,
    pub month_options: Vec<MonthFilter>,

    /// Current selection and the rows it matches.
    pub view: Option<FilteredView>,

    /// Metrics for `view`; `None` when the selection is empty.
    pub summary: Option<Summary>,

    /// Trend points for `view`.
    pub trend: Vec<[f64; 2]>,

    /// Whole-dataset aggregates, computed once per load.
    pub yearly_totals: Vec<YearTotal>,
    pub extremes: Option<ExtremeMonths>,

    pub year_colors: Option<YearColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(load_options: LoadOptions) -> Self {
        Self {
            dataset: None,
            load_options,
            year_options: Vec::new(),
            month_options: Vec::new(),
            view: None,
            summary: None,
            trend: Vec::new(),
            yearly_totals: Vec::new(),
            extremes: None,
            year_colors: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset.  The first year and "All" months are
    /// selected.
    pub fn set_dataset(&mut self, dataset: PassengerDataset) {
        let dataset = Arc::new(dataset);

        self.year_options = dataset.years().to_vec();
        self.month_options = month_options(&dataset);
        self.yearly_totals = yearly_totals(&dataset);
        self.extremes = extreme_months(&dataset);
        self.year_colors = Some(YearColors::new(dataset.years()));
        self.status_message = None;

        let first_year = self.year_options.first().copied();
        self.dataset = Some(dataset);
        self.view = None;
        match first_year {
            Some(year) => self.select(year, MonthFilter::All),
            None => {
                self.summary = None;
                self.trend.clear();
                self.status_message = Some("Dataset contains no rows.".to_string());
            }
        }
    }

    /// Load `source` and start a fresh session on it.  A failure leaves the
    /// state empty with the full error chain as the status message.
    pub fn load_from(&mut self, source: &DataSource) {
        match load_dataset(source, &self.load_options) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} months covering {:?}..{:?} from {source}",
                    dataset.len(),
                    dataset.years().first(),
                    dataset.years().last()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                let e = anyhow::Error::new(e).context(format!("loading {source}"));
                log::error!("Failed to load dataset: {e:#}");
                self.fail_load(format!("Error: {e:#}"));
            }
        }
    }

    /// Drop any loaded data and show why.  No filtering happens until a
    /// new dataset is loaded.
    pub fn fail_load(&mut self, message: String) {
        *self = Self::new(std::mem::take(&mut self.load_options));
        self.status_message = Some(message);
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.view.as_ref().map(|v| v.year)
    }

    pub fn selected_month(&self) -> MonthFilter {
        self.view
            .as_ref()
            .map(|v| v.month.clone())
            .unwrap_or_default()
    }

    pub fn set_year(&mut self, year: i32) {
        let month = self.selected_month();
        self.select(year, month);
    }

    pub fn set_month(&mut self, month: MonthFilter) {
        if let Some(year) = self.selected_year() {
            self.select(year, month);
        }
    }

    /// Recompute the view and its metrics for a new selection.
    pub fn select(&mut self, year: i32, month: MonthFilter) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let view = FilteredView::new(ds, year, month);
        self.summary = summarize(view.records(ds));
        self.trend = trend_series(view.records(ds));
        self.view = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample;

    fn loaded() -> AppState {
        let mut state = AppState::new(LoadOptions::default());
        state.set_dataset(sample::dataset());
        state
    }

    #[test]
    fn loading_selects_first_year_and_all_months() {
        let state = loaded();
        assert_eq!(state.selected_year(), Some(1949));
        assert_eq!(state.selected_month(), MonthFilter::All);
        assert_eq!(state.view.as_ref().unwrap().len(), 12);
        assert_eq!(state.summary.unwrap().max, 148);
        assert_eq!(state.trend.len(), 12);
        assert_eq!(state.year_options.len(), 12);
        assert_eq!(state.month_options.len(), 13);
        assert_eq!(state.yearly_totals[0].total, 1520);
        assert_eq!(state.extremes.unwrap().busiest.name, "July");
    }

    #[test]
    fn changing_selection_recomputes_view() {
        let mut state = loaded();
        state.set_month(MonthFilter::named("August"));
        assert_eq!(state.summary.unwrap().max, 148);
        state.set_year(1960);
        assert_eq!(state.selected_month(), MonthFilter::named("August"));
        let s = state.summary.unwrap();
        assert_eq!((s.count, s.max, s.min), (1, 606, 606));
        state.set_month(MonthFilter::All);
        assert_eq!(state.summary.unwrap().count, 12);
    }

    #[test]
    fn empty_selection_has_no_metrics() {
        let mut state = loaded();
        state.set_year(1930);
        assert!(state.view.as_ref().unwrap().is_empty());
        assert!(state.summary.is_none());
        assert!(state.trend.is_empty());
    }

    #[test]
    fn failed_load_clears_everything() {
        let mut state = loaded();
        state.fail_load("boom".to_string());
        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        assert!(state.yearly_totals.is_empty());
        assert_eq!(state.status_message.as_deref(), Some("boom"));
        assert_eq!(state.load_options, LoadOptions::default());

        state.set_year(1949);
        assert!(state.view.is_none());
    }

    #[test]
    fn unreadable_source_halts_with_cause() {
        let mut state = loaded();
        state.load_from(&DataSource::parse("/nonexistent/AirP.csv"));
        assert!(state.dataset.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Error: loading /nonexistent/AirP.csv: unable to load dataset"));
    }

    #[test]
    fn empty_dataset_reports_status() {
        let mut state = AppState::new(LoadOptions::default());
        state.set_dataset(PassengerDataset::from_records("empty", Vec::new()));
        assert!(state.view.is_none());
        assert!(state.status_message.is_some());
    }
}
