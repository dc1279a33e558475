//! Schedule rendering
//!
//! Generates the controller code listing in TXT or JSON form.

use crate::config::OutputFormat;
use anyhow::Result;
use light_pattern_compiler::{format_offset, Schedule, ScheduleEntry};
use serde::Serialize;
use std::io::Write;

/// Indentation before each function name in the TXT listing
const CALL_INDENT: &str = "    ";

/// JSON view of one schedule entry
#[derive(Debug, Serialize)]
struct EntryRecord<'a> {
    offset: String,
    offset_seconds: f64,
    calls: &'a [String],
}

impl<'a> From<&'a ScheduleEntry> for EntryRecord<'a> {
    fn from(entry: &'a ScheduleEntry) -> Self {
        let offset_seconds = entry.offset.num_seconds() as f64
            + entry.offset.subsec_nanos() as f64 / 1_000_000_000.0;
        Self {
            offset: format_offset(entry.offset),
            offset_seconds,
            calls: &entry.calls,
        }
    }
}

/// Write a schedule in the requested format
pub fn write_schedule<W: Write>(schedule: &Schedule, format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Txt => write_txt(schedule, writer),
        OutputFormat::Json => write_json(schedule, writer),
    }
}

/// One offset line per entry, then one indented line per function name
fn write_txt<W: Write>(schedule: &Schedule, writer: &mut W) -> Result<()> {
    for entry in schedule {
        writeln!(writer, "{}", format_offset(entry.offset))?;
        for call in &entry.calls {
            writeln!(writer, "{}{}", CALL_INDENT, call)?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(schedule: &Schedule, writer: &mut W) -> Result<()> {
    let records: Vec<EntryRecord> = schedule.entries().iter().map(EntryRecord::from).collect();
    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    Ok(())
}
