//! Fixed-size `UserAssist` value layouts.
//!
//! A value's layout is determined solely by its byte length: 16 bytes is the
//! legacy (pre-focus-tracking) layout, 72 bytes is the modern layout. Anything
//! else is unrecognized and skipped by the dispatcher.

use serde::{Deserialize, Serialize};

use crate::bytes::LeReader;
use crate::duration::{HumanDuration, to_human_duration};
use crate::error::DecodeError;

/// Byte length of a legacy value.
pub const LEGACY_RECORD_LEN: usize = 16;

/// Byte length of a modern value.
pub const MODERN_RECORD_LEN: usize = 72;

/// Number of reserved float slots in a modern value.
pub const R0_SLOT_COUNT: usize = 10;

/// The layout selected for a value by its byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueLayout {
    Legacy,
    Modern,
    Unrecognized(usize),
}

impl ValueLayout {
    /// Selects the layout for a blob of `len` bytes.
    #[must_use]
    pub const fn from_len(len: usize) -> Self {
        match len {
            LEGACY_RECORD_LEN => Self::Legacy,
            MODERN_RECORD_LEN => Self::Modern,
            other => Self::Unrecognized(other),
        }
    }
}

/// A legacy 16-byte value: run count and last-used time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRecord {
    pub session_id: i32,
    pub run_count: i32,
    /// Raw FILETIME ticks.
    pub last_used: i64,
}

impl LegacyRecord {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = LeReader::exact(bytes, LEGACY_RECORD_LEN)?;
        Ok(Self {
            session_id: reader.i32("session_id")?,
            run_count: reader.i32("run_count")?,
            last_used: reader.i64("last_used")?,
        })
    }
}

/// A modern 72-byte value with focus tracking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModernRecord {
    pub session_id: i32,
    pub run_count: i32,
    pub focus_count: i32,
    pub focus_time_ms: i32,
    /// Reserved slots, historically labelled "r0 value[0..9]".
    pub r0_slots: [f32; R0_SLOT_COUNT],
    pub rewrite_counter: i32,
    /// Raw FILETIME ticks.
    pub last_used: i64,
    pub trailing: i32,
}

impl ModernRecord {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = LeReader::exact(bytes, MODERN_RECORD_LEN)?;
        let session_id = reader.i32("session_id")?;
        let run_count = reader.i32("run_count")?;
        let focus_count = reader.i32("focus_count")?;
        let focus_time_ms = reader.i32("focus_time_ms")?;

        let mut r0_slots = [0.0; R0_SLOT_COUNT];
        for slot in &mut r0_slots {
            *slot = reader.f32("r0_slot")?;
        }

        Ok(Self {
            session_id,
            run_count,
            focus_count,
            focus_time_ms,
            r0_slots,
            rewrite_counter: reader.i32("rewrite_counter")?,
            last_used: reader.i64("last_used")?,
            trailing: reader.i32("trailing")?,
        })
    }

    /// Focus time broken into calendar units; `None` if the stored value is negative.
    pub fn focus_duration(&self) -> Option<HumanDuration> {
        to_human_duration(i64::from(self.focus_time_ms))
    }
}

/// A decoded run-count value, in whichever layout its length selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRecord {
    Legacy(LegacyRecord),
    Modern(ModernRecord),
}

impl ValueRecord {
    /// Decodes a value blob, dispatching strictly on its length.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        match ValueLayout::from_len(bytes.len()) {
            ValueLayout::Legacy => LegacyRecord::decode(bytes).map(Self::Legacy),
            ValueLayout::Modern => ModernRecord::decode(bytes).map(Self::Modern),
            ValueLayout::Unrecognized(len) => Err(DecodeError::UnrecognizedLength(len)),
        }
    }
}
