use std::fmt;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Int64Type};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::{DatasetError, LoadError, SchemaError};
use super::model::{PassengerDataset, PassengerRecord};
use super::period::parse_month;

/// Public location of the airline passenger table.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/Loyallamichael1/Air_Passenger_Dashboard/main/AirP.csv";

// ---------------------------------------------------------------------------
// Source description
// ---------------------------------------------------------------------------

/// Column names used to locate the month and passenger-count fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub month_column: String,
    pub count_column: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            month_column: "Month".to_string(),
            count_column: "#Passengers".to_string(),
        }
    }
}

/// Where the table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched; anything else is a
    /// local path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }

    /// Pick the table format from the extension.  URLs without a known
    /// extension are read as CSV; local files must name their format.
    pub fn format(&self) -> Result<SourceFormat, LoadError> {
        match self {
            DataSource::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let last = path.rsplit('/').next().unwrap_or(path);
                let ext = last.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
                Ok(SourceFormat::from_extension(ext).unwrap_or(SourceFormat::Csv))
            }
            DataSource::Path(path) => match path.extension().and_then(|e| e.to_str()) {
                None => Ok(SourceFormat::Csv),
                Some(ext) => SourceFormat::from_extension(ext)
                    .ok_or_else(|| LoadError::UnsupportedFormat(ext.to_ascii_lowercase())),
            },
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
    Parquet,
}

impl SourceFormat {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            "parquet" | "pq" => Some(SourceFormat::Parquet),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch, validate and normalise a passenger dataset.  Any failure rejects
/// the whole table.
pub fn load_dataset(
    source: &DataSource,
    options: &LoadOptions,
) -> Result<PassengerDataset, DatasetError> {
    let format = source.format()?;
    log::debug!("Reading {source} as {format:?}");
    let bytes = read_source(source)?;
    load_from_bytes(bytes, format, &source.to_string(), options)
}

/// Load a local file chosen by the user.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<PassengerDataset, DatasetError> {
    load_dataset(&DataSource::Path(path.to_path_buf()), options)
}

/// Parse an in-memory table.
pub fn load_from_bytes(
    bytes: Bytes,
    format: SourceFormat,
    label: &str,
    options: &LoadOptions,
) -> Result<PassengerDataset, DatasetError> {
    let records = match format {
        SourceFormat::Csv => read_csv(&bytes, options)?,
        SourceFormat::Json => read_json(&bytes, options)?,
        SourceFormat::Parquet => read_parquet(bytes, options)?,
    };

    let negatives = records.iter().filter(|r| r.passengers < 0).count();
    if negatives > 0 {
        log::warn!("{negatives} rows in {label} have a negative passenger count");
    }

    Ok(PassengerDataset::from_records(label, records))
}

fn read_source(source: &DataSource) -> Result<Bytes, LoadError> {
    match source {
        DataSource::Path(path) => std::fs::read(path)
            .map(Bytes::from)
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
        DataSource::Url(url) => {
            let http_err = |source| LoadError::Http {
                url: url.clone(),
                source,
            };
            let response = reqwest::blocking::get(url).map_err(http_err)?;
            if !response.status().is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: response.status(),
                });
            }
            response.bytes().map_err(http_err)
        }
    }
}

// -- Shared row helpers --

fn to_record(row: usize, month: &str, passengers: i64) -> Result<PassengerRecord, LoadError> {
    let period = parse_month(month).ok_or_else(|| LoadError::BadMonth {
        row,
        value: month.to_string(),
    })?;
    Ok(PassengerRecord::new(period, passengers))
}

/// Integers, or floats with no fractional part ("112.0").
fn parse_count(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    s.parse::<f64>().ok().and_then(integral_count)
}

/// A float count is kept only when it is whole and inside the `i64` range.
/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn integral_count(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then(|| f as i64)
}

fn column_index(headers: &[String], column: &str) -> Result<usize, SchemaError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SchemaError::missing(column, headers))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; every data row must have a month and a
/// count.  Extra columns are ignored.
fn read_csv(bytes: &[u8], options: &LoadOptions) -> Result<Vec<PassengerRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .map_err(LoadError::from)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let month_idx = column_index(&headers, &options.month_column)?;
    let count_idx = column_index(&headers, &options.count_column)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(LoadError::from)?;
        let month = record.get(month_idx).unwrap_or("");
        let count = record.get(count_idx).unwrap_or("");
        let passengers = parse_count(count).ok_or_else(|| LoadError::BadCount {
            row,
            value: count.to_string(),
        })?;
        records.push(to_record(row, month, passengers)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default of `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Month": "1949-01", "#Passengers": 112 },
///   ...
/// ]
/// ```
fn read_json(bytes: &[u8], options: &LoadOptions) -> Result<Vec<PassengerRecord>, DatasetError> {
    let rows: Vec<Map<String, JsonValue>> =
        serde_json::from_slice(bytes).map_err(LoadError::from)?;
    // No objects means no keys, the same as a CSV header without the column.
    if rows.is_empty() {
        return Err(SchemaError::missing(&options.month_column, &[]).into());
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, obj) in rows.iter().enumerate() {
        let row = i + 1;
        let keys = || obj.keys().cloned().collect::<Vec<_>>();
        let month = obj
            .get(&options.month_column)
            .ok_or_else(|| SchemaError::missing(&options.month_column, &keys()))?;
        let count = obj
            .get(&options.count_column)
            .ok_or_else(|| SchemaError::missing(&options.count_column, &keys()))?;

        let month = month.as_str().ok_or_else(|| LoadError::BadMonth {
            row,
            value: month.to_string(),
        })?;
        let passengers = json_count(count).ok_or_else(|| LoadError::BadCount {
            row,
            value: count.to_string(),
        })?;
        records.push(to_record(row, month, passengers)?);
    }
    Ok(records)
}

fn json_count(val: &JsonValue) -> Option<i64> {
    match val {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_count)),
        JsonValue::String(s) => parse_count(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema:
/// - month column: Utf8 / LargeUtf8 (any layout `parse_month` accepts),
///   Date32, Date64 or Timestamp of any unit and zone
/// - count column: any integer type
///
/// Works with files written by both **Pandas** (`df.to_parquet()`, including
/// `datetime64` month columns) and **Polars** (`df.write_parquet()`).
fn read_parquet(bytes: Bytes, options: &LoadOptions) -> Result<Vec<PassengerRecord>, DatasetError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes).map_err(LoadError::from)?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let month_idx = column_index(&headers, &options.month_column)?;
    let count_idx = column_index(&headers, &options.count_column)?;

    let reader = builder.build().map_err(LoadError::from)?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(LoadError::from)?;
        let months = date_column(batch.column(month_idx))?;
        let counts = integer_column(batch.column(count_idx), &options.count_column, records.len())?;
        let counts = counts.as_primitive::<Int64Type>();

        for i in 0..batch.num_rows() {
            let row = records.len() + 1;
            if counts.is_null(i) {
                return Err(LoadError::BadCount {
                    row,
                    value: "null".to_string(),
                }
                .into());
            }
            let passengers = counts.value(i);
            let record = match months.data_type() {
                DataType::Date32 => {
                    let date = months
                        .as_primitive::<Date32Type>()
                        .value_as_date(i)
                        .filter(|_| !months.is_null(i))
                        .ok_or_else(|| LoadError::BadMonth {
                            row,
                            value: "null".to_string(),
                        })?;
                    PassengerRecord::new(date, passengers)
                }
                DataType::Utf8 | DataType::LargeUtf8 => {
                    let text = if months.is_null(i) {
                        ""
                    } else {
                        string_value(&months, i)
                    };
                    to_record(row, text, passengers)?
                }
                other => {
                    return Err(LoadError::UnsupportedColumn {
                        row,
                        column: options.month_column.clone(),
                        kind: other.to_string(),
                    }
                    .into())
                }
            };
            records.push(record);
        }
    }
    Ok(records)
}

/// Widen any integer column to Int64.  Floats and strings are refused
/// rather than coerced.
fn integer_column(col: &ArrayRef, name: &str, rows_before: usize) -> Result<ArrayRef, LoadError> {
    if !col.data_type().is_integer() {
        return Err(LoadError::UnsupportedColumn {
            row: rows_before + 1,
            column: name.to_string(),
            kind: col.data_type().to_string(),
        });
    }
    Ok(cast(col, &DataType::Int64)?)
}

/// Reduce timestamp and millisecond-date columns to Date32 so they share
/// the day-count path.  Other types pass through untouched.
fn date_column(col: &ArrayRef) -> Result<ArrayRef, LoadError> {
    match col.data_type() {
        DataType::Timestamp(_, _) | DataType::Date64 => Ok(cast(col, &DataType::Date32)?),
        _ => Ok(col.clone()),
    }
}

fn string_value(col: &ArrayRef, row: usize) -> &str {
    match col.data_type() {
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        _ => col.as_string::<i32>().value(row),
    }
}
