use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors
// ---------------------------------------------------------------------------

/// Any failure that prevents a dataset from being built.  Both kinds are
/// terminal: no filtering or rendering happens after one of them.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unable to load dataset")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// The source could not be fetched or parsed as tabular passenger data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetching {url}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url}: server answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading Arrow column")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("row {row}: '{value}' is not a recognisable month")]
    BadMonth { row: usize, value: String },

    #[error("row {row}: '{value}' is not a valid passenger count")]
    BadCount { row: usize, value: String },

    #[error("row {row}: column '{column}' has unsupported type {kind}")]
    UnsupportedColumn {
        row: usize,
        column: String,
        kind: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

/// A required column is missing from the source.
#[derive(Debug, Error)]
#[error("column '{column}' not found in dataset (available: {})", .available.join(", "))]
pub struct SchemaError {
    pub column: String,
    pub available: Vec<String>,
}

impl SchemaError {
    pub fn missing(column: &str, available: &[String]) -> Self {
        SchemaError {
            column: column.to_string(),
            available: available.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_available_columns() {
        let err = SchemaError::missing("Month", &["Date".to_string(), "#Passengers".to_string()]);
        assert_eq!(
            err.to_string(),
            "column 'Month' not found in dataset (available: Date, #Passengers)"
        );
    }

    #[test]
    fn load_error_keeps_cause_chain() {
        let err: DatasetError = LoadError::BadMonth {
            row: 3,
            value: "soon".into(),
        }
        .into();
        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(
            chain,
            "unable to load dataset: row 3: 'soon' is not a recognisable month"
        );
    }
}
