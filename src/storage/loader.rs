//! CSV loading and writing for the price and event tables

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::event::EventRecord;
use crate::price::{self, PriceObservation};
use crate::{Error, Result};
use super::schema::{EventRow, PriceRow, EVENT_COLUMNS, PRICE_COLUMNS};

/// Load the price table from a CSV file
pub fn load_prices(path: &Path) -> Result<Vec<PriceObservation>> {
    let file = open(path)?;
    read_prices(file, path)
}

/// Load the event table from a CSV file
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>> {
    let file = open(path)?;
    read_events(file, path)
}

/// Parse price rows from any reader. `source` only labels errors.
pub fn read_prices<R: Read>(reader: R, source: &Path) -> Result<Vec<PriceObservation>> {
    let mut reader = csv_reader(reader);
    let headers = checked_headers(&mut reader, &PRICE_COLUMNS, source)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::load(source, e.to_string()))?;
        let line = line_of(&record);
        let row: PriceRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::load(source, format!("line {}: {}", line, e)))?;

        let date = price::parse_price_date(&row.date)
            .map_err(|e| Error::load(source, format!("line {}: {}", line, e)))?;
        if !row.price.is_finite() {
            return Err(Error::load(source, format!("line {}: price is not a finite number", line)));
        }
        rows.push(PriceObservation::new(date, row.price));
    }

    tracing::debug!("Read {} price rows from {}", rows.len(), source.display());
    Ok(rows)
}

/// Parse event rows from any reader. `source` only labels errors.
pub fn read_events<R: Read>(reader: R, source: &Path) -> Result<Vec<EventRecord>> {
    let mut reader = csv_reader(reader);
    let headers = checked_headers(&mut reader, &EVENT_COLUMNS, source)?;

    let mut events = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::load(source, e.to_string()))?;
        let line = line_of(&record);
        let row: EventRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::load(source, format!("line {}: {}", line, e)))?;

        let date = price::parse_iso_date(&row.date)
            .map_err(|e| Error::load(source, format!("line {}: {}", line, e)))?;
        events.push(EventRecord {
            date,
            event: row.event,
            description: row.description,
            category: row.category,
            impact_level: row.impact_level,
        });
    }

    tracing::debug!("Read {} events from {}", events.len(), source.display());
    Ok(events)
}

/// Write a price table in the same schema the loader reads
pub fn write_prices(path: &Path, rows: &[PriceObservation]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_prices_to(file, rows)
}

/// Write a price table to any writer
pub fn write_prices_to<W: Write>(writer: W, rows: &[PriceObservation]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(PriceRow {
            date: row.table_date(),
            price: row.price,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::load(path, format!("cannot open file: {}", e)))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn checked_headers<R: Read>(
    reader: &mut csv::Reader<R>,
    required: &[&str],
    source: &Path,
) -> Result<csv::StringRecord> {
    let headers = reader
        .headers()
        .map_err(|e| Error::load(source, format!("cannot read header: {}", e)))?
        .clone();

    for column in required {
        // Description is the only optional event column
        if *column == "Description" {
            continue;
        }
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::load(source, format!("missing required column `{}`", column)));
        }
    }
    Ok(headers)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_read_prices() {
        let csv = "Date,Price\n20-May-87,18.63\n21-May-87,18.45\n";
        let rows = read_prices(csv.as_bytes(), Path::new("prices.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], PriceObservation::new(date(1987, 5, 20), 18.63));
        assert_eq!(rows[1].price, 18.45);
    }

    #[test]
    fn test_read_events() {
        let csv = "\
Date,Event,Description,Category,Impact_Level
2020-03-11,COVID-19 Pandemic,\"WHO declares pandemic, demand collapses\",Economic,High
1990-08-02,Iraq invades Kuwait,Gulf War begins,Geopolitical,High
";
        let events = read_events(csv.as_bytes(), Path::new("events.csv")).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date, date(2020, 3, 11));
        assert_eq!(events[0].description, "WHO declares pandemic, demand collapses");
        assert_eq!(events[1].category, "Geopolitical");
        assert_eq!(events[1].impact_level, "High");
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv = "Date,Price\n20-May-87,18.63\n1987-05-21,18.45\n";
        let err = read_prices(csv.as_bytes(), Path::new("prices.csv")).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Load { .. }));
        assert!(message.contains("prices.csv"), "{}", message);
        assert!(message.contains("line 3"), "{}", message);
    }

    #[test]
    fn test_bad_price_is_load_error() {
        let csv = "Date,Price\n20-May-87,abc\n";
        let err = read_prices(csv.as_bytes(), Path::new("prices.csv")).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));

        let csv = "Date,Price\n20-May-87,NaN\n";
        assert!(read_prices(csv.as_bytes(), Path::new("prices.csv")).is_err());
    }

    #[test]
    fn test_missing_column() {
        let csv = "Date,Event,Category\n2020-03-11,COVID,Economic\n";
        let err = read_events(csv.as_bytes(), Path::new("events.csv")).unwrap_err();
        assert!(err.to_string().contains("Impact_Level"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_prices(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("prices.csv");
        let rows = vec![
            PriceObservation::new(date(2022, 2, 24), 99.08),
            PriceObservation::new(date(2022, 2, 25), 97.5),
        ];

        write_prices(&path, &rows).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Date,Price\n24-Feb-22,99.08\n"));

        let loaded = load_prices(&path).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_bundled_events_table() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("events.csv");
        let events = load_events(&path).unwrap();
        assert_eq!(events.len(), 10);
        assert!(events.windows(2).all(|w| w[0].date < w[1].date));
        assert!(events.iter().all(|e| !e.description.is_empty()));
    }
}
