//! CSV and JSON writers for decoded records.

use std::collections::BTreeMap;
use std::io::{self, Write};

use ua_core::row::{COLUMNS, RecordRow};
use ua_core::{SessionAggregate, UserAssistRecord};

/// Writes a header row followed by one row per record.
///
/// Every row has every column; cells that do not apply are empty.
pub fn write_csv<W: Write>(writer: &mut W, records: &[UserAssistRecord]) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(RecordRow::from(record).cells())?;
    }
    wtr.flush()
}

/// Writes the session aggregates as a pretty-printed JSON object keyed by GUID.
pub fn write_sessions<W: Write>(
    writer: &mut W,
    sessions: &BTreeMap<String, SessionAggregate>,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, sessions).map_err(io::Error::from)?;
    writeln!(writer)
}
