//! Routing raw `UserAssist` values to their decoders.
//!
//! Each GUID bucket is decoded in two passes: the `UEME_CTLSESSION` aggregate
//! first, then every run-count value, so that modern records can be scored
//! against their bucket's aggregate. Buckets share no state and are decoded
//! in parallel.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::guid::KnownGuid;
use crate::record::{LegacyRecord, ModernRecord, ValueRecord};
use crate::session::{SESSION_VALUE_NAME, SessionAggregate};
use crate::stats::{DerivedStatistics, SessionWeights};

/// A value name (already shift-13 decoded) and its raw data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub name: String,
    pub data: Vec<u8>,
}

impl RawValue {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// All values recorded under one `UserAssist` category GUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidBucket {
    pub guid: String,
    pub values: Vec<RawValue>,
}

/// The layout-specific part of a decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum RecordKind {
    Legacy(LegacyRecord),
    Modern {
        record: ModernRecord,
        stats: DerivedStatistics,
    },
}

/// One decoded run-count value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAssistRecord {
    pub guid: String,
    pub category: KnownGuid,
    /// The decoded value name, usually an executable path or shell identifier.
    pub path: String,
    pub kind: RecordKind,
}

impl UserAssistRecord {
    /// Last component of the path, split on either separator.
    pub fn name(&self) -> &str {
        self.path.rsplit(['\\', '/']).next().unwrap_or(&self.path)
    }
}

/// A value that produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedValue {
    pub guid: String,
    pub name: String,
    pub len: usize,
    pub reason: DecodeError,
}

impl fmt::Display for SkippedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped {} in {} ({} bytes): {}",
            self.name, self.guid, self.len, self.reason
        )
    }
}

/// Decoding results for a single bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketReport {
    pub guid: String,
    pub records: Vec<UserAssistRecord>,
    pub session: Option<SessionAggregate>,
    pub skipped: Vec<SkippedValue>,
}

/// Which value layouts a decode run encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatGeneration {
    /// Only 16-byte values (pre-focus-tracking Windows).
    Legacy,
    /// Only 72-byte values, which carry focus counters.
    Modern,
    /// Both layouts.
    Mixed,
}

/// Decoding results across all buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub records: Vec<UserAssistRecord>,
    pub sessions: BTreeMap<String, SessionAggregate>,
    pub skipped: Vec<SkippedValue>,
}

impl DecodeReport {
    /// The layout generation seen, or `None` if no record was decoded.
    pub fn format(&self) -> Option<FormatGeneration> {
        let legacy = self
            .records
            .iter()
            .any(|r| matches!(r.kind, RecordKind::Legacy(_)));
        let modern = self
            .records
            .iter()
            .any(|r| matches!(r.kind, RecordKind::Modern { .. }));
        match (legacy, modern) {
            (true, true) => Some(FormatGeneration::Mixed),
            (true, false) => Some(FormatGeneration::Legacy),
            (false, true) => Some(FormatGeneration::Modern),
            (false, false) => None,
        }
    }

    fn merge(&mut self, bucket: BucketReport) {
        self.records.extend(bucket.records);
        self.skipped.extend(bucket.skipped);
        if let Some(session) = bucket.session {
            self.sessions.insert(bucket.guid, session);
        }
    }
}

/// Decodes one bucket. Never fails: undecodable values become skip notices.
pub fn decode_bucket(bucket: &GuidBucket) -> BucketReport {
    let guid = bucket.guid.as_str();
    let category = KnownGuid::from_guid(guid);
    let mut skipped = Vec::new();

    let mut session = None;
    for value in bucket.values.iter().filter(|v| v.name == SESSION_VALUE_NAME) {
        match SessionAggregate::decode(&value.data) {
            Ok(aggregate) => {
                if session.replace(aggregate).is_some() {
                    tracing::warn!(guid, "duplicate {SESSION_VALUE_NAME}, keeping the last one");
                }
            }
            Err(e) => {
                tracing::warn!(guid, len = value.data.len(), error = %e, "skipping malformed {SESSION_VALUE_NAME}");
                skipped.push(skip(guid, value, e));
            }
        }
    }
    let weights = session.as_ref().map(SessionWeights::from_aggregate);

    let mut records = Vec::new();
    for value in bucket.values.iter().filter(|v| v.name != SESSION_VALUE_NAME) {
        let kind = match ValueRecord::decode(&value.data) {
            Ok(ValueRecord::Legacy(record)) => RecordKind::Legacy(record),
            Ok(ValueRecord::Modern(record)) => RecordKind::Modern {
                stats: DerivedStatistics::compute(&record, weights.as_ref()),
                record,
            },
            Err(e) => {
                tracing::warn!(
                    guid,
                    name = %value.name,
                    len = value.data.len(),
                    "skipping value with unrecognized layout"
                );
                skipped.push(skip(guid, value, e));
                continue;
            }
        };
        records.push(UserAssistRecord {
            guid: guid.to_string(),
            category,
            path: value.name.clone(),
            kind,
        });
    }

    tracing::debug!(
        guid,
        records = records.len(),
        skipped = skipped.len(),
        has_session = session.is_some(),
        "decoded bucket"
    );

    BucketReport {
        guid: guid.to_string(),
        records,
        session,
        skipped,
    }
}

fn skip(guid: &str, value: &RawValue, reason: DecodeError) -> SkippedValue {
    SkippedValue {
        guid: guid.to_string(),
        name: value.name.clone(),
        len: value.data.len(),
        reason,
    }
}

/// Decodes every bucket in parallel, merging results in input order.
pub fn decode_buckets(buckets: &[GuidBucket]) -> DecodeReport {
    let reports: Vec<BucketReport> = buckets.par_iter().map(decode_bucket).collect();

    let mut report = DecodeReport::default();
    for bucket in reports {
        report.merge(bucket);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::guid::{EXECUTABLE_LAUNCH_GUID, SHORTCUT_LAUNCH_GUID};
    use crate::record::R0_SLOT_COUNT;
    use crate::record::tests::{legacy_bytes, modern_bytes};
    use crate::session::SESSION_RECORD_LEN;
    use crate::session::tests::session_bytes;

    fn session_value(total_launches: i32) -> RawValue {
        RawValue::new(
            SESSION_VALUE_NAME,
            session_bytes(
                [9, total_launches, 20, 1_000],
                &[(0, 0, 0, ""), (0, 0, 0, ""), (4, 8, 600, "C:\\top.exe")],
            ),
        )
    }

    fn bucket(guid: &str, values: Vec<RawValue>) -> GuidBucket {
        GuidBucket {
            guid: guid.to_string(),
            values,
        }
    }

    #[test]
    fn legacy_value_has_no_focus_fields() {
        let report = decode_bucket(&bucket(
            EXECUTABLE_LAUNCH_GUID,
            vec![RawValue::new("C:\\Windows\\notepad.exe", legacy_bytes(1, 6, 0))],
        ));

        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.category, KnownGuid::ExecutableLaunch);
        assert_eq!(record.name(), "notepad.exe");
        let RecordKind::Legacy(legacy) = record.kind else {
            panic!("expected legacy record, got {:?}", record.kind);
        };
        assert_eq!(legacy.run_count, 6);
    }

    #[test]
    fn modern_value_is_scored_against_session() {
        let report = decode_bucket(&bucket(
            EXECUTABLE_LAUNCH_GUID,
            vec![
                RawValue::new("C:\\tool.exe", modern_bytes(2, 4, 100)),
                session_value(10),
            ],
        ));

        // The aggregate is found even though it comes after the record.
        assert!(report.session.is_some());
        assert_eq!(report.records.len(), 1);
        let RecordKind::Modern { record, stats } = report.records[0].kind else {
            panic!("expected modern record");
        };
        assert_eq!(record.r0_slots.len(), R0_SLOT_COUNT);
        let n = stats.n_value.unwrap();
        assert!((n - 500.0).abs() < 1e-9);
        assert!(stats.r0_value.is_some());
        assert!(stats.usage_percentage.is_some());
    }

    #[test]
    fn missing_session_keeps_counters_but_omits_statistics() {
        let report = decode_bucket(&bucket(
            SHORTCUT_LAUNCH_GUID,
            vec![RawValue::new("Chrome", modern_bytes(2, 4, 100))],
        ));

        assert!(report.session.is_none());
        let RecordKind::Modern { record, stats } = report.records[0].kind else {
            panic!("expected modern record");
        };
        assert_eq!(record.run_count, 2);
        assert_eq!(record.focus_count, 4);
        assert_eq!(record.focus_time_ms, 100);
        assert_eq!(stats.r0_value, None);
        assert_eq!(stats.usage_percentage, None);
    }

    #[test]
    fn unrecognized_length_is_skipped() {
        let report = decode_bucket(&bucket(
            "{0D6D4F41-2994-4BA0-8FEF-620E43CD2812}",
            vec![
                RawValue::new("odd", vec![0u8; 17]),
                RawValue::new("ok", legacy_bytes(1, 1, 0)),
            ],
        ));

        assert_eq!(report.records.len(), 1);
        assert_eq!(
            report.skipped,
            vec![SkippedValue {
                guid: "{0D6D4F41-2994-4BA0-8FEF-620E43CD2812}".to_string(),
                name: "odd".to_string(),
                len: 17,
                reason: DecodeError::UnrecognizedLength(17),
            }]
        );
        assert_eq!(
            report.skipped[0].to_string(),
            "skipped odd in {0D6D4F41-2994-4BA0-8FEF-620E43CD2812} (17 bytes): unrecognized value length: 17 bytes"
        );
    }

    #[test]
    fn duplicate_session_last_one_wins() {
        let report = decode_bucket(&bucket(
            EXECUTABLE_LAUNCH_GUID,
            vec![session_value(10), session_value(0)],
        ));

        assert_eq!(report.session.unwrap().total_launches, 0);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn malformed_session_is_reported_absent() {
        let report = decode_bucket(&bucket(
            EXECUTABLE_LAUNCH_GUID,
            vec![
                RawValue::new(SESSION_VALUE_NAME, vec![0u8; 100]),
                RawValue::new("C:\\tool.exe", modern_bytes(2, 4, 100)),
            ],
        ));

        assert!(report.session.is_none());
        assert_eq!(report.skipped.len(), 1);
        let RecordKind::Modern { stats, .. } = report.records[0].kind else {
            panic!("expected modern record");
        };
        assert_eq!(stats, DerivedStatistics::default());
    }

    #[test]
    fn session_name_match_is_case_sensitive() {
        let report = decode_bucket(&bucket(
            EXECUTABLE_LAUNCH_GUID,
            vec![RawValue::new("ueme_ctlsession", session_value(10).data)],
        ));

        assert!(report.session.is_none());
        // An aggregate-sized blob is not a run-count layout.
        assert_eq!(
            report.skipped[0].reason,
            DecodeError::UnrecognizedLength(SESSION_RECORD_LEN)
        );
    }

    #[test]
    fn buckets_are_isolated() {
        let buckets = vec![
            bucket(EXECUTABLE_LAUNCH_GUID, vec![session_value(10)]),
            bucket(
                SHORTCUT_LAUNCH_GUID,
                vec![RawValue::new("link", modern_bytes(1, 1, 1))],
            ),
        ];
        let report = decode_buckets(&buckets);

        assert_eq!(report.sessions.len(), 1);
        assert!(report.sessions.contains_key(EXECUTABLE_LAUNCH_GUID));
        let RecordKind::Modern { stats, .. } = report.records[0].kind else {
            panic!("expected modern record");
        };
        // The shortcut bucket has no aggregate of its own.
        assert_eq!(stats.r0_value, None);
        assert_eq!(report.format(), Some(FormatGeneration::Modern));
    }

    #[test]
    fn format_generation_detection() {
        let legacy = decode_buckets(&[bucket(
            EXECUTABLE_LAUNCH_GUID,
            vec![RawValue::new("a", legacy_bytes(1, 1, 0))],
        )]);
        assert_eq!(legacy.format(), Some(FormatGeneration::Legacy));

        let mixed = decode_buckets(&[bucket(
            EXECUTABLE_LAUNCH_GUID,
            vec![
                RawValue::new("a", legacy_bytes(1, 1, 0)),
                RawValue::new("b", modern_bytes(1, 1, 1)),
            ],
        )]);
        assert_eq!(mixed.format(), Some(FormatGeneration::Mixed));

        assert_eq!(DecodeReport::default().format(), None);
    }

    #[test]
    fn name_handles_both_separators() {
        let record = UserAssistRecord {
            guid: String::new(),
            category: KnownGuid::Other,
            path: "%windir%/system32\\calc.exe".to_string(),
            kind: RecordKind::Legacy(LegacyRecord {
                session_id: 0,
                run_count: 0,
                last_used: 0,
            }),
        };
        assert_eq!(record.name(), "calc.exe");

        let bare = UserAssistRecord {
            path: "Microsoft.Windows.Explorer".to_string(),
            ..record
        };
        assert_eq!(bare.name(), "Microsoft.Windows.Explorer");
    }
}
