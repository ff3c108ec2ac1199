//! Core decoding logic for Windows `UserAssist` artifacts.
//!
//! This crate contains the fundamental types and logic for:
//! - Record decoding: the 16-byte legacy and 72-byte modern value layouts
//! - Session aggregates: the `UEME_CTLSESSION` value and its top-3 (NMax) entries
//! - Statistics: the derived N value, R0 value and usage percentage
//! - Dispatch: routing each raw value of a GUID bucket to the right decoder

mod bytes;
pub mod dispatch;
pub mod duration;
mod error;
pub mod guid;
pub mod record;
pub mod rot13;
pub mod row;
pub mod session;
pub mod stats;

pub use dispatch::{
    BucketReport, DecodeReport, FormatGeneration, GuidBucket, RawValue, RecordKind,
    SkippedValue, UserAssistRecord, decode_bucket, decode_buckets,
};
pub use duration::{HumanDuration, filetime_to_datetime, filetime_to_iso8601, to_human_duration};
pub use error::DecodeError;
pub use guid::KnownGuid;
pub use record::{LegacyRecord, ModernRecord, ValueLayout, ValueRecord};
pub use row::RecordRow;
pub use session::{
    NmaxEntry, PATH_FIELD_LEN, SESSION_RECORD_LEN, SESSION_VALUE_NAME, SessionAggregate,
};
pub use stats::{DerivedStatistics, SessionWeights};
