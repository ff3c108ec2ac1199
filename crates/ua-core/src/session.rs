//! The `UEME_CTLSESSION` aggregate value.
//!
//! Each GUID bucket may carry one `UEME_CTLSESSION` value: four session-wide
//! totals followed by three NMax entries (the top-ranked applications), each
//! three counters and a NUL-padded UTF-16LE path in a 520-byte field.

use serde::{Deserialize, Serialize};

use crate::bytes::LeReader;
use crate::error::DecodeError;

/// Reserved value name of the session aggregate (exact, case-sensitive).
pub const SESSION_VALUE_NAME: &str = "UEME_CTLSESSION";

/// Width of each embedded UTF-16LE path field.
pub const PATH_FIELD_LEN: usize = 520;

/// Byte length of one NMax entry: three `i32` counters and the path field.
pub const NMAX_ENTRY_LEN: usize = 3 * 4 + PATH_FIELD_LEN;

/// Byte length of a session aggregate blob: four `i32` totals and three entries.
pub const SESSION_RECORD_LEN: usize = 4 * 4 + 3 * NMAX_ENTRY_LEN;

/// Index of the NMax entry treated as the most-used application.
///
/// The third slot is authoritative by convention; it is not recomputed from the
/// three entries' counters.
pub const MOST_USED_SLOT: usize = 2;

/// One of the three top-ranked applications in a session aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmaxEntry {
    pub run_count: i32,
    pub focus_count: i32,
    pub focus_time: i32,
    pub executable_path: String,
}

/// Session-wide totals for a GUID bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAggregate {
    pub session_id: i32,
    pub total_launches: i32,
    pub total_switches: i32,
    pub total_user_time: i32,
    pub nmax: [NmaxEntry; 3],
}

impl SessionAggregate {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = LeReader::exact(bytes, SESSION_RECORD_LEN)?;
        let session_id = reader.i32("session_id")?;
        let total_launches = reader.i32("total_launches")?;
        let total_switches = reader.i32("total_switches")?;
        let total_user_time = reader.i32("total_user_time")?;
        let nmax = [
            read_nmax(&mut reader)?,
            read_nmax(&mut reader)?,
            read_nmax(&mut reader)?,
        ];

        Ok(Self {
            session_id,
            total_launches,
            total_switches,
            total_user_time,
            nmax,
        })
    }

    /// The entry used as the most-used application when normalizing R0 values.
    pub const fn most_used(&self) -> &NmaxEntry {
        &self.nmax[MOST_USED_SLOT]
    }
}

fn read_nmax(reader: &mut LeReader<'_>) -> Result<NmaxEntry, DecodeError> {
    Ok(NmaxEntry {
        run_count: reader.i32("nmax.run_count")?,
        focus_count: reader.i32("nmax.focus_count")?,
        focus_time: reader.i32("nmax.focus_time")?,
        executable_path: decode_utf16_field(reader.slice(PATH_FIELD_LEN, "nmax.executable_path")?),
    })
}

/// Decodes a fixed-width UTF-16LE field, stopping at the first NUL code unit.
///
/// Without a terminator the whole field is used. Invalid UTF-16 yields an empty
/// string rather than failing the enclosing record.
pub fn decode_utf16_field(field: &[u8]) -> String {
    let units: Vec<u16> = field
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .take_while(|&unit| unit != 0)
        .collect();

    String::from_utf16(&units).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid UTF-16 in path field, substituting empty path");
        String::new()
    })
}
