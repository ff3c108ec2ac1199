//! Flat tabular projection of decoded records.
//!
//! Legacy and modern records share one column set. Cells that do not apply to
//! a record's layout, or derived values that could not be computed, are empty
//! rather than zero.

use serde::Serialize;

use crate::dispatch::{RecordKind, UserAssistRecord};
use crate::duration::filetime_to_iso8601;
use crate::guid::KnownGuid;
use crate::record::R0_SLOT_COUNT;

/// Column names in output order: the union of legacy and modern fields.
pub const COLUMNS: [&str; 26] = [
    "guid",
    "category",
    "name",
    "path",
    "session_id",
    "run_count",
    "focus_count",
    "focus_time_ms",
    "focus_time",
    "last_used_utc",
    "last_used_filetime",
    "n_value",
    "r0_value",
    "usage_percentage",
    "rewrite_counter",
    "r0_value[0]",
    "r0_value[1]",
    "r0_value[2]",
    "r0_value[3]",
    "r0_value[4]",
    "r0_value[5]",
    "r0_value[6]",
    "r0_value[7]",
    "r0_value[8]",
    "r0_value[9]",
    "trailing",
];

/// One output row. `None` fields render as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub guid: String,
    pub category: KnownGuid,
    pub name: String,
    pub path: String,
    pub session_id: i32,
    pub run_count: i32,
    pub focus_count: Option<i32>,
    pub focus_time_ms: Option<i32>,
    pub focus_time: Option<String>,
    pub last_used_utc: String,
    pub last_used_filetime: i64,
    pub n_value: Option<f64>,
    pub r0_value: Option<f64>,
    pub usage_percentage: Option<f64>,
    pub rewrite_counter: Option<i32>,
    pub r0_slots: Option<[f32; R0_SLOT_COUNT]>,
    pub trailing: Option<i32>,
}

impl From<&UserAssistRecord> for RecordRow {
    fn from(record: &UserAssistRecord) -> Self {
        let mut row = Self {
            guid: record.guid.clone(),
            category: record.category,
            name: record.name().to_string(),
            path: record.path.clone(),
            session_id: 0,
            run_count: 0,
            focus_count: None,
            focus_time_ms: None,
            focus_time: None,
            last_used_utc: String::new(),
            last_used_filetime: 0,
            n_value: None,
            r0_value: None,
            usage_percentage: None,
            rewrite_counter: None,
            r0_slots: None,
            trailing: None,
        };

        match record.kind {
            RecordKind::Legacy(legacy) => {
                row.session_id = legacy.session_id;
                row.run_count = legacy.run_count;
                row.last_used_filetime = legacy.last_used;
            }
            RecordKind::Modern { record, stats } => {
                row.session_id = record.session_id;
                row.run_count = record.run_count;
                row.focus_count = Some(record.focus_count);
                row.focus_time_ms = Some(record.focus_time_ms);
                row.focus_time = record.focus_duration().map(|d| d.to_string());
                row.last_used_filetime = record.last_used;
                row.n_value = stats.n_value;
                row.r0_value = stats.r0_value;
                row.usage_percentage = stats.usage_percentage;
                row.rewrite_counter = Some(record.rewrite_counter);
                row.r0_slots = Some(record.r0_slots);
                row.trailing = Some(record.trailing);
            }
        }
        row.last_used_utc = filetime_to_iso8601(row.last_used_filetime);
        row
    }
}

impl RecordRow {
    /// Cell text for every column, in [`COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.guid.clone(),
            self.category.to_string(),
            self.name.clone(),
            self.path.clone(),
            self.session_id.to_string(),
            self.run_count.to_string(),
            cell(self.focus_count),
            cell(self.focus_time_ms),
            self.focus_time.clone().unwrap_or_default(),
            self.last_used_utc.clone(),
            self.last_used_filetime.to_string(),
            cell(self.n_value),
            cell(self.r0_value),
            cell(self.usage_percentage),
            cell(self.rewrite_counter),
        ];
        match self.r0_slots {
            Some(slots) => cells.extend(slots.iter().map(ToString::to_string)),
            None => cells.extend(std::iter::repeat_n(String::new(), R0_SLOT_COUNT)),
        }
        cells.push(cell(self.trailing));
        cells
    }
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
