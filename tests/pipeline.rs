//! End-to-end tests: write a table to disk, load it, filter and aggregate.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use air_passenger_dashboard::data::error::{DatasetError, LoadError};
use air_passenger_dashboard::data::filter::{filter_by_year, FilteredView, MonthFilter};
use air_passenger_dashboard::data::loader::{load_dataset, load_file, DataSource, LoadOptions};
use air_passenger_dashboard::data::sample;
use air_passenger_dashboard::data::stats::{
    extreme_months, monthly_means, summarize, yearly_totals, YearTotal,
};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::tempdir;

fn sample_csv() -> String {
    let mut text = String::from("Month,#Passengers\n");
    for (month, p) in sample::rows() {
        text.push_str(&format!("{month},{p}\n"));
    }
    text
}

fn load(path: &Path) -> Result<air_passenger_dashboard::data::model::PassengerDataset, DatasetError> {
    load_file(path, &LoadOptions::default())
}

#[test]
fn concrete_three_month_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("three.csv");
    fs::write(&path, "Month,#Passengers\n1949-01,112\n1949-02,118\n1950-01,115\n").unwrap();

    let ds = load(&path).unwrap();
    assert_eq!(filter_by_year(&ds, 1949), vec![0, 1]);

    let view = FilteredView::new(&ds, 1949, MonthFilter::All);
    let s = summarize(view.records(&ds)).unwrap();
    assert_eq!((s.max, s.min, s.mean), (118, 112, 115.0));

    assert_eq!(
        yearly_totals(&ds),
        vec![
            YearTotal { year: 1949, total: 230 },
            YearTotal { year: 1950, total: 115 },
        ]
    );
}

#[test]
fn full_series_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("AirP.csv");
    fs::write(&path, sample_csv()).unwrap();

    let ds = load(&path).unwrap();
    assert_eq!(ds.len(), 144);
    assert_eq!(ds.years().len(), 12);

    let totals = yearly_totals(&ds);
    assert_eq!(totals.len(), ds.years().len());
    assert_eq!(totals[0], YearTotal { year: 1949, total: 1520 });
    for t in &totals {
        let sum: i128 = filter_by_year(&ds, t.year)
            .iter()
            .map(|&i| i128::from(ds.records()[i].passengers))
            .sum();
        assert_eq!(t.total, sum);
    }

    let ex = extreme_months(&ds).unwrap();
    assert_eq!(ex.busiest.name, "July");
    assert_eq!(ex.slowest.name, "November");
    for m in monthly_means(&ds) {
        assert!(ds.month_names().contains(&m.name));
        assert!(ex.busiest.mean >= m.mean && ex.slowest.mean <= m.mean);
    }
}

#[test]
fn every_year_view_respects_metric_ordering() {
    let ds = sample::dataset();
    for &year in ds.years() {
        for month in [MonthFilter::All, MonthFilter::named("March")] {
            let view = FilteredView::new(&ds, year, month);
            let s = summarize(view.records(&ds)).unwrap();
            assert!(s.max as f64 >= s.mean && s.mean >= s.min as f64);
        }
    }
}

#[test]
fn json_and_parquet_match_csv() {
    let dir = tempdir().unwrap();

    let json_path = dir.path().join("AirP.json");
    let records: Vec<_> = sample::rows()
        .map(|(m, p)| serde_json::json!({ "Month": m, "#Passengers": p }))
        .collect();
    fs::write(&json_path, serde_json::to_string(&records).unwrap()).unwrap();

    let parquet_path = dir.path().join("AirP.parquet");
    let rows: Vec<(String, i64)> = sample::rows().collect();
    let schema = Arc::new(Schema::new(vec![
        Field::new("Month", DataType::Utf8, false),
        Field::new("#Passengers", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|(m, _)| m.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(rows.iter().map(|(_, p)| *p).collect::<Vec<_>>())),
        ],
    )
    .unwrap();
    let file = fs::File::create(&parquet_path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let expected = sample::dataset();
    for path in [&json_path, &parquet_path] {
        let ds = load(path).unwrap();
        assert_eq!(ds.records(), expected.records(), "{}", path.display());
        assert_eq!(ds.source(), path.display().to_string());
    }
}

#[test]
fn malformed_month_rejects_whole_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    let mut text = sample_csv();
    text.push_str("not-a-date,500\n");
    fs::write(&path, text).unwrap();

    match load(&path) {
        Err(DatasetError::Load(LoadError::BadMonth { row, value })) => {
            assert_eq!(row, 145);
            assert_eq!(value, "not-a-date");
        }
        other => panic!("expected a bad-month load error, got {other:?}"),
    }
}

#[test]
fn missing_month_column_is_schema_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nomonth.csv");
    fs::write(&path, "Date,#Passengers\n1949-01,112\n").unwrap();
    assert!(matches!(load(&path), Err(DatasetError::Schema(e)) if e.column == "Month"));
}

#[test]
fn unsupported_extension_is_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("AirP.xlsx");
    fs::write(&path, "irrelevant").unwrap();
    let err = load_dataset(&DataSource::Path(path), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DatasetError::Load(LoadError::UnsupportedFormat(_))));
}
