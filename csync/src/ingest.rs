//! Row ingestion.
//!
//! The spreadsheet arrives as a CSV export with one header row and a fixed
//! column order: first name, last name, phone, email, location, social
//! handle, birthday. Columns 5 and 6 are accepted but never read. The
//! driver pulls rows one at a time through [`RowSource`], so a row limit
//! stops reading instead of reading-then-discarding.

use std::collections::VecDeque;
use std::path::Path;

use csync_common::contact::IncomingRecord;
use csync_common::{Error, Result};

/// Column positions in the fixed export layout.
const COL_FIRST_NAME: usize = 0;
const COL_LAST_NAME: usize = 1;
const COL_PHONE: usize = 2;
const COL_EMAIL: usize = 3;
const COL_BIRTHDAY: usize = 6;

/// Sequential source of incoming records.
pub trait RowSource {
    /// Next data row, or `None` when the source is exhausted.
    fn next_record(&mut self) -> Result<Option<IncomingRecord>>;
}

/// CSV-backed row source. The header row is consumed on open and never
/// surfaces as a record; short rows are tolerated (missing cells read as
/// empty).
pub struct CsvRowSource {
    records: csv::StringRecordsIntoIter<std::fs::File>,
}

impl CsvRowSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path.as_ref())
            .map_err(|e| Error::Ingest(e.to_string()))?;
        Ok(CsvRowSource {
            records: reader.into_records(),
        })
    }
}

impl RowSource for CsvRowSource {
    fn next_record(&mut self) -> Result<Option<IncomingRecord>> {
        match self.records.next() {
            None => Ok(None),
            Some(Err(e)) => Err(Error::Ingest(e.to_string())),
            Some(Ok(row)) => {
                let cell = |index: usize| row.get(index).unwrap_or("").trim().to_string();
                Ok(Some(IncomingRecord {
                    first_name: cell(COL_FIRST_NAME),
                    last_name: cell(COL_LAST_NAME),
                    phone: cell(COL_PHONE),
                    email: cell(COL_EMAIL),
                    birthday: cell(COL_BIRTHDAY),
                }))
            }
        }
    }
}

/// In-memory row source for tests.
impl RowSource for VecDeque<IncomingRecord> {
    fn next_record(&mut self) -> Result<Option<IncomingRecord>> {
        Ok(self.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn header_row_is_skipped_and_unused_columns_ignored() {
        let file = write_csv(
            "First Name,Last Name,WhatsApp Number,Personal Email,Location,Social Media Handles,Birthday\n\
             Nova,Galaxy,678-901-2345,nova.galaxy@example.com,Miami,@nova_galaxy,Sep-13\n",
        );
        let mut source = CsvRowSource::open(file.path()).unwrap();

        let row = source.next_record().unwrap().unwrap();
        assert_eq!(row.first_name, "Nova");
        assert_eq!(row.last_name, "Galaxy");
        assert_eq!(row.phone, "678-901-2345");
        assert_eq!(row.email, "nova.galaxy@example.com");
        assert_eq!(row.birthday, "Sep-13");
        assert!(source.next_record().unwrap().is_none());
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let file = write_csv("First,Last,Phone,Email,Loc,Social,Birthday\nLyra,Stellar\n");
        let mut source = CsvRowSource::open(file.path()).unwrap();

        let row = source.next_record().unwrap().unwrap();
        assert_eq!(row.first_name, "Lyra");
        assert_eq!(row.phone, "");
        assert_eq!(row.birthday, "");
    }

    #[test]
    fn missing_file_is_an_ingest_error() {
        assert!(matches!(
            CsvRowSource::open("/nonexistent/contacts.csv"),
            Err(Error::Ingest(_))
        ));
    }
}
