//! Writes record collections to CSV and JSON files.
//!
//! The CSV layout is the one the rest of the tooling round-trips: a
//! plain header row taken from the first record's field names, then one
//! line per record with every field quoted and embedded quotes doubled.
//! Files land in the working directory under a timestamped name.

use std::fs::File;
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

pub struct RecordExporter;

impl RecordExporter {
    /// Exports `records` to `<name>_<timestamp>.csv` and returns a
    /// status line for the message bar.
    pub fn export_csv<T: Serialize>(name: &str, records: &[T]) -> Result<String> {
        let csv = Self::csv_string(records)?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{name}_{timestamp}.csv");

        let mut file = File::create(&filename)
            .with_context(|| format!("creating {filename}"))?;
        file.write_all(csv.as_bytes())?;

        info!(target: "export", "wrote {} rows to {filename}", records.len());
        Ok(format!(
            "✓ Exported {} rows to CSV file: {}",
            records.len(),
            filename
        ))
    }

    /// Exports `records` to `<name>_<timestamp>.json` as a pretty JSON
    /// array, the same shape the store itself persists.
    pub fn export_json<T: Serialize>(name: &str, records: &[T]) -> Result<String> {
        if records.is_empty() {
            return Err(anyhow!("No data to export"));
        }
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{name}_{timestamp}.json");

        let file = File::create(&filename)
            .with_context(|| format!("creating {filename}"))?;
        serde_json::to_writer_pretty(file, records)?;

        info!(target: "export", "wrote {} rows to {filename}", records.len());
        Ok(format!(
            "✓ Exported {} rows to JSON file: {}",
            records.len(),
            filename
        ))
    }

    /// The CSV text itself. Field order follows the record's field
    /// declaration order.
    pub fn csv_string<T: Serialize>(records: &[T]) -> Result<String> {
        if records.is_empty() {
            return Err(anyhow!("No data to export"));
        }

        let rows: Vec<Value> = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?;
        let Some(first) = rows.first().and_then(Value::as_object) else {
            return Err(anyhow!("Records did not serialize to objects"));
        };
        let headers: Vec<&str> = first.keys().map(String::as_str).collect();

        let mut csv = headers.join(",");
        csv.push('\n');
        for row in &rows {
            let object = row.as_object();
            let fields: Vec<String> = headers
                .iter()
                .map(|header| {
                    let value = object.and_then(|map| map.get(*header));
                    Self::quote_field(&Self::scalar_text(value))
                })
                .collect();
            csv.push_str(&fields.join(","));
            csv.push('\n');
        }
        Ok(csv)
    }

    /// Every field is quoted, embedded quotes doubled.
    fn quote_field(field: &str) -> String {
        format!("\"{}\"", field.replace('"', "\"\""))
    }

    fn scalar_text(value: Option<&Value>) -> String {
        match value {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entity, Game, Order};

    #[test]
    fn test_header_row_follows_declaration_order() {
        let games = Game::seed();
        let csv = RecordExporter::csv_string(&games).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "id,name,genre,platform,price,releaseDate,rating,description"
        );
    }

    #[test]
    fn test_every_data_field_is_quoted() {
        let orders = Order::seed();
        let csv = RecordExporter::csv_string(&orders).unwrap();
        let first_row = csv.lines().nth(1).unwrap();
        assert!(first_row.starts_with("\"1\",\"1\",\"John Doe\""));
        assert!(first_row.contains("\"Completed\""));
        for field in first_row.split("\",\"") {
            assert!(!field.is_empty());
        }
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        #[derive(Serialize)]
        struct Row {
            note: String,
        }
        let rows = vec![Row {
            note: "say \"hi\", twice".to_string(),
        }];
        let csv = RecordExporter::csv_string(&rows).unwrap();
        assert_eq!(csv, "note\n\"say \"\"hi\"\", twice\"\n");
    }

    #[test]
    fn test_empty_collection_is_an_error() {
        let none: Vec<Game> = Vec::new();
        assert!(RecordExporter::csv_string(&none).is_err());
    }

    #[test]
    fn test_numbers_export_as_raw_json_text() {
        let games = Game::seed();
        let csv = RecordExporter::csv_string(&games).unwrap();
        assert!(csv.contains("\"29.99\""));
        assert!(csv.contains("\"2015-05-19\""));
    }
}
