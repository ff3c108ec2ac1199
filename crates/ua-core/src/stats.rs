//! Derived usage statistics for modern records.
//!
//! ```text
//! launch_avg = total_user_time / total_launches
//! switch_avg = total_user_time / total_switches
//! N          = run_count * launch_avg + focus_count * switch_avg + focus_time
//! R0         = N / N(most-used NMax entry)
//! usage      = N / total_user_time
//! ```
//!
//! Every division whose divisor is zero, and every value that depends on a
//! missing session aggregate, is `None` rather than a conventional zero.

use serde::{Deserialize, Serialize};

use crate::record::ModernRecord;
use crate::session::SessionAggregate;

/// Per-bucket weights precomputed from the session aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionWeights {
    /// Average user time per launch; 0 when there were no launches.
    pub launch_avg: f64,
    /// Average user time per focus switch; 0 when there were no switches.
    pub switch_avg: f64,
    /// N value of the most-used application.
    pub most_used_n: f64,
    pub total_user_time: i32,
}

impl SessionWeights {
    pub fn from_aggregate(aggregate: &SessionAggregate) -> Self {
        let total_user_time = f64::from(aggregate.total_user_time);
        let launch_avg = average(total_user_time, aggregate.total_launches);
        let switch_avg = average(total_user_time, aggregate.total_switches);
        let most_used = aggregate.most_used();

        let mut weights = Self {
            launch_avg,
            switch_avg,
            most_used_n: 0.0,
            total_user_time: aggregate.total_user_time,
        };
        weights.most_used_n = weights.n_value(
            most_used.run_count,
            most_used.focus_count,
            most_used.focus_time,
        );
        weights
    }

    /// Usage score of an application with the given counters.
    pub fn n_value(&self, run_count: i32, focus_count: i32, focus_time: i32) -> f64 {
        f64::from(run_count).mul_add(
            self.launch_avg,
            f64::from(focus_count).mul_add(self.switch_avg, f64::from(focus_time)),
        )
    }
}

/// A zero-count average resolves to 0 so the corresponding N term drops out.
fn average(total: f64, count: i32) -> f64 {
    if count == 0 { 0.0 } else { total / f64::from(count) }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

/// Statistics derived for one modern record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedStatistics {
    pub n_value: Option<f64>,
    pub r0_value: Option<f64>,
    /// N value as a fraction of the session's total user time.
    pub usage_percentage: Option<f64>,
}

impl DerivedStatistics {
    /// Computes statistics for `record` against its bucket's weights, if any.
    pub fn compute(record: &ModernRecord, weights: Option<&SessionWeights>) -> Self {
        let Some(weights) = weights else {
            return Self::default();
        };

        let n_value = weights.n_value(record.run_count, record.focus_count, record.focus_time_ms);
        Self {
            n_value: Some(n_value),
            r0_value: ratio(n_value, weights.most_used_n),
            usage_percentage: ratio(n_value, f64::from(weights.total_user_time)),
        }
    }
}
