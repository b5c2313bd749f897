//! Daily completed-session aggregation.
//!
//! One counter per local calendar day, created lazily on the first
//! completed work session of that day. Counts only ever increase; there is
//! no decrement and no automatic reset. The phase machine is the sole
//! writer, and only for naturally completed Work phases -- skip and reset
//! never credit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map from date key (`YYYY-MM-DD`, local timezone) to the number of
/// completed work sessions on that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyStats {
    days: BTreeMap<String, u64>,
}

impl DailyStats {
    /// Credit one completed work session to `date_key`.
    pub fn record_completion(&mut self, date_key: &str) {
        *self.days.entry(date_key.to_string()).or_insert(0) += 1;
    }

    /// Completed work sessions on `date_key`, 0 if none recorded.
    pub fn query(&self, date_key: &str) -> u64 {
        self.days.get(date_key).copied().unwrap_or(0)
    }

    /// All-time completed work sessions.
    pub fn total(&self) -> u64 {
        self.days.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazily_creates_entries() {
        let mut stats = DailyStats::default();
        assert_eq!(stats.query("2026-08-27"), 0);
        stats.record_completion("2026-08-27");
        assert_eq!(stats.query("2026-08-27"), 1);
        stats.record_completion("2026-08-27");
        assert_eq!(stats.query("2026-08-27"), 2);
    }

    #[test]
    fn days_are_independent() {
        let mut stats = DailyStats::default();
        stats.record_completion("2026-08-27");
        stats.record_completion("2026-08-28");
        assert_eq!(stats.query("2026-08-27"), 1);
        assert_eq!(stats.query("2026-08-28"), 1);
        assert_eq!(stats.total(), 2);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut stats = DailyStats::default();
        stats.record_completion("2026-08-27");
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"2026-08-27":1}"#);
        let back: DailyStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
