use std::sync::Arc;

use air_passenger_dashboard::data::sample;
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

/// Write the 1949–1960 airline passenger series so the dashboard can run
/// without network access.  The format follows the output extension:
/// `.csv` (default), `.json` or `.parquet`.
fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "AirP.csv".to_string());
    let rows: Vec<(String, i64)> = sample::rows().collect();

    let ext = output_path
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => {
            let records: Vec<_> = rows
                .iter()
                .map(|(month, p)| json!({ "Month": month, "#Passengers": p }))
                .collect();
            let text = serde_json::to_string_pretty(&records).expect("Failed to encode JSON");
            std::fs::write(&output_path, text).expect("Failed to write output file");
        }
        "parquet" | "pq" => {
            let months = StringArray::from(rows.iter().map(|(m, _)| m.as_str()).collect::<Vec<_>>());
            let passengers = Int64Array::from(rows.iter().map(|(_, p)| *p).collect::<Vec<_>>());

            let schema = Arc::new(Schema::new(vec![
                Field::new("Month", DataType::Utf8, false),
                Field::new("#Passengers", DataType::Int64, false),
            ]));
            let batch = RecordBatch::try_new(
                schema.clone(),
                vec![Arc::new(months), Arc::new(passengers)],
            )
            .expect("Failed to create RecordBatch");

            let file = std::fs::File::create(&output_path).expect("Failed to create output file");
            let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
            writer.write(&batch).expect("Failed to write batch");
            writer.close().expect("Failed to close writer");
        }
        _ => {
            let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");
            writer
                .write_record(["Month", "#Passengers"])
                .expect("Failed to write header");
            for (month, p) in &rows {
                writer
                    .write_record([month.clone(), p.to_string()])
                    .expect("Failed to write row");
            }
            writer.flush().expect("Failed to flush output");
        }
    }

    println!("Wrote {} months to {output_path}", rows.len());
}
