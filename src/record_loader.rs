//! Reads record collections back in from CSV files.
//!
//! Counterpart to the exporter: headers map onto the serialized field
//! names, so a file produced by `export_csv` loads without edits. Ids in
//! the file are kept as-is.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::Entity;

pub struct RecordLoader;

impl RecordLoader {
    pub fn load_csv<T: Entity>(path: &Path) -> Result<Vec<T>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let mut records = Vec::new();
        for (line, row) in reader.deserialize::<T>().enumerate() {
            let record = row.with_context(|| {
                format!("parsing {} record on line {}", T::NAME, line + 2)
            })?;
            records.push(record);
        }
        info!(
            target: "import",
            "loaded {} {} records from {}",
            records.len(),
            T::NAME,
            path.display()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Game, Order, OrderStatus};
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_games_from_quoted_csv() {
        let file = write_csv(
            "id,name,genre,platform,price,releaseDate,rating,description\n\
             \"3\",\"Outer Wilds\",\"Adventure\",\"PC\",\"24.99\",\"2019-05-28\",\"9.4\",\"Time loop mystery\"\n",
        );
        let games: Vec<Game> = RecordLoader::load_csv(file.path()).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, 3);
        assert_eq!(games[0].name, "Outer Wilds");
        assert_eq!(games[0].price, 24.99);
        assert_eq!(games[0].release_date.to_string(), "2019-05-28");
    }

    #[test]
    fn test_load_orders_parses_status_labels() {
        let file = write_csv(
            "id,playerId,playerName,gameId,gameName,date,amount,status\n\
             1,2,Jane Smith,3,God of War,2024-01-16,39.99,Pending\n",
        );
        let orders: Vec<Order> = RecordLoader::load_csv(file.path()).unwrap();
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(orders[0].player_name, "Jane Smith");
    }

    #[test]
    fn test_bad_field_reports_the_line() {
        let file = write_csv(
            "id,name,genre,platform,price,releaseDate,rating,description\n\
             1,Halo,FPS,Xbox,not-a-price,2021-12-08,8.5,ok\n",
        );
        let err = RecordLoader::load_csv::<Game>(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
