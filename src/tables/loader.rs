//! Load interest tables from CSV
//!
//! Expected header: `installments,full_rate,half_rate`

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{InterestTable, RatePair, TableError};

#[derive(Debug, Deserialize)]
struct RateRecord {
    installments: u32,
    full_rate: f64,
    half_rate: f64,
}

/// Load and validate an interest table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<InterestTable, TableError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = load_table_from_reader(file)?;
    log::info!("Loaded interest table with {} entries from {}", table.len(), path.display());
    Ok(table)
}

/// Load and validate an interest table from any CSV reader.
/// Rows may appear in any order; they are sorted before validation.
pub fn load_table_from_reader<R: Read>(reader: R) -> Result<InterestTable, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for result in rdr.deserialize() {
        let record: RateRecord = result?;
        entries.push((record.installments, RatePair::new(record.full_rate, record.half_rate)));
    }
    entries.sort_by_key(|(count, _)| *count);

    InterestTable::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::TableSelector;

    #[test]
    fn test_load_from_reader() {
        let data = "installments,full_rate,half_rate\n\
                    3, 15.5, 8\n\
                    2, 12, 6\n\
                    4, 19, 10\n";
        let table = load_table_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rate(2, TableSelector::Full), Some(12.0));
        assert_eq!(table.rate(3, TableSelector::Full), Some(15.5));
        assert_eq!(table.rate(4, TableSelector::Half), Some(10.0));
    }

    #[test]
    fn test_load_rejects_invalid_rows() {
        let bad_number = "installments,full_rate,half_rate\n2,abc,6\n";
        assert!(matches!(load_table_from_reader(bad_number.as_bytes()), Err(TableError::Csv(_))));

        let gap = "installments,full_rate,half_rate\n2,12,6\n5,20,10\n";
        assert!(matches!(
            load_table_from_reader(gap.as_bytes()),
            Err(TableError::NonContiguous { expected: 3, found: 5 })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_table("/nonexistent/rates.csv");
        assert!(matches!(result, Err(TableError::Io(_))));
    }
}
