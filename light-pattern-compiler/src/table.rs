//! Pattern table reader
//!
//! Reads the CSV form of a light pattern using the `csv` crate.
//!
//! ## Layout
//! - Record 1: one duration per block, in seconds (`2`, `0.25`, `1.5`)
//! - Every following record: one channel's state tokens, one per block
//!
//! State tokens are kept as raw text here; interpreting them is the job of
//! the compiler stages.

use crate::types::{CompileError, Offset, Result};
use chrono::TimeDelta;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Maximum number of fractional digits accepted in a duration (nanoseconds)
const MAX_FRACTION_DIGITS: usize = 9;

/// In-memory pattern table: a duration row plus one state row per channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    durations: Vec<Offset>,
    rows: Vec<Vec<String>>,
}

impl PatternTable {
    /// Build a table from already-parsed durations and raw state rows
    pub fn new(durations: Vec<Offset>, rows: Vec<Vec<String>>) -> Self {
        Self { durations, rows }
    }

    /// Read a pattern table from a CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        log::info!("Reading pattern table: {:?}", path);

        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;

        log::info!(
            "Read {} blocks and {} state rows from {:?}",
            table.block_count(),
            table.channel_count(),
            path
        );
        Ok(table)
    }

    /// Read a pattern table from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = csv_reader.records();

        let duration_record = records.next().ok_or(CompileError::MissingDurations)??;
        let durations = duration_record
            .iter()
            .map(parse_seconds)
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            // Separator-only lines (e.g. trailing ",,," from spreadsheet exports)
            if record.iter().all(|field| field.trim().is_empty()) {
                log::trace!("Skipping blank record: {:?}", record);
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        log::debug!("Parsed durations: {:?}", durations);
        Ok(Self { durations, rows })
    }

    /// Block durations, one per column
    pub fn durations(&self) -> &[Offset] {
        &self.durations
    }

    /// Raw state rows, one per channel
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn block_count(&self) -> usize {
        self.durations.len()
    }

    pub fn channel_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse a non-negative decimal number of seconds into an exact duration
///
/// Accepts surrounding whitespace and up to nine fractional digits. Signs,
/// exponents (`1e3`) and anything else are rejected. This is deliberately
/// narrower than a general float parse: only plain decimals can be converted
/// to nanoseconds without rounding.
pub fn parse_seconds(text: &str) -> Result<Offset> {
    let trimmed = text.trim();
    let invalid = || CompileError::InvalidDuration(trimmed.to_string());

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if (whole.is_empty() && fraction.is_empty())
        || !is_digits(whole)
        || !is_digits(fraction)
        || fraction.len() > MAX_FRACTION_DIGITS
    {
        return Err(invalid());
    }

    let seconds: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let nanos: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{:0<width$}", fraction, width = MAX_FRACTION_DIGITS)
            .parse()
            .map_err(|_| invalid())?
    };

    TimeDelta::try_seconds(seconds)
        .and_then(|secs| secs.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("2").unwrap(), TimeDelta::seconds(2));
        assert_eq!(parse_seconds(" 0.25 ").unwrap(), TimeDelta::milliseconds(250));
        assert_eq!(parse_seconds(".5").unwrap(), TimeDelta::milliseconds(500));
        assert_eq!(parse_seconds("3.").unwrap(), TimeDelta::seconds(3));
        assert_eq!(parse_seconds("0.000000001").unwrap(), TimeDelta::nanoseconds(1));
        assert_eq!(parse_seconds("0").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn test_parse_seconds_rejects_junk() {
        for text in ["", " ", ".", "-1", "+1", "1e3", "abc", "1.2.3", "0.0000000001"] {
            match parse_seconds(text) {
                Err(CompileError::InvalidDuration(_)) => {}
                other => panic!("Expected invalid duration for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_read_table() {
        let csv = "2,3,1,4\nON,,OFF,\nOFF,ON,,OFF\n";
        let table = PatternTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.block_count(), 4);
        assert_eq!(table.channel_count(), 2);
        assert_eq!(table.durations()[1], TimeDelta::seconds(3));
        assert_eq!(table.rows()[0], vec!["ON", "", "OFF", ""]);
        assert_eq!(table.rows()[1], vec!["OFF", "ON", "", "OFF"]);
    }

    #[test]
    fn test_blank_records_are_skipped() {
        let csv = "2,3\nON,OFF\n,\n   \n , \nOFF,ON\n,,,,\n";
        let table = PatternTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.channel_count(), 2);
        assert_eq!(table.rows()[0], vec!["ON", "OFF"]);
        assert_eq!(table.rows()[1], vec!["OFF", "ON"]);
    }

    #[test]
    fn test_rows_of_different_widths() {
        let csv = "1,1,1\nON,OFF\n";
        let table = PatternTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn test_missing_durations() {
        assert!(matches!(
            PatternTable::from_reader("".as_bytes()),
            Err(CompileError::MissingDurations)
        ));
    }

    #[test]
    fn test_invalid_duration_cell() {
        let csv = "2,soon\nON,OFF\n";
        match PatternTable::from_reader(csv.as_bytes()) {
            Err(CompileError::InvalidDuration(text)) => assert_eq!(text, "soon"),
            other => panic!("Expected invalid duration, got {:?}", other),
        }
    }

    #[test]
    fn test_read_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"5,2\nON,OFF\n").unwrap();
        temp_file.flush().unwrap();

        let table = PatternTable::from_path(temp_file.path()).unwrap();
        assert_eq!(table.durations(), &[TimeDelta::seconds(5), TimeDelta::seconds(2)]);
        assert_eq!(table.channel_count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = PatternTable::from_path(Path::new("does-not-exist.csv"));
        assert!(matches!(result, Err(CompileError::Io(_))));
    }
}
