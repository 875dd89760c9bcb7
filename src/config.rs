use clap::Parser;

use crate::data::filter::MonthFilter;
use crate::data::loader::{DataSource, LoadOptions, DEFAULT_SOURCE_URL};

/// Interactive dashboard for monthly air passenger counts.
#[derive(Parser, Debug, Clone)]
#[command(name = "air-passenger-dashboard", version)]
#[command(about = "Explore a monthly air passenger time series by year and month")]
pub struct Args {
    /// CSV / JSON / Parquet source: an http(s) URL or a local path
    #[arg(short, long, env = "AIRP_SOURCE", default_value = DEFAULT_SOURCE_URL)]
    pub source: String,

    /// Name of the column holding the month identifier
    #[arg(long, default_value = "Month")]
    pub month_column: String,

    /// Name of the column holding the passenger count
    #[arg(long, default_value = "#Passengers")]
    pub count_column: String,

    /// Year to select initially (default: first year in the data)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month name to select initially, or "All"
    #[arg(short, long, default_value = "All")]
    pub month: MonthFilter,

    /// Print the dashboard figures to stdout instead of opening a window
    #[arg(long)]
    pub report: bool,

    /// With --report, emit JSON instead of text
    #[arg(long, requires = "report")]
    pub json: bool,
}

impl Args {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            month_column: self.month_column.clone(),
            count_column: self.count_column.clone(),
        }
    }
}
