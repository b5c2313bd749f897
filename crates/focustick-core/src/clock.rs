//! Wall-clock reads.
//!
//! The engine never stores a clock; methods that depend on time take an
//! explicit `now_ms` (the `*_at` variants) and convenience wrappers read
//! from here. Tests drive the `*_at` variants with virtual timestamps.

use chrono::Local;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Local calendar day, `YYYY-MM-DD`.
///
/// Daily stats bucket by the observer's local date at the moment a work
/// phase completes, so a session crossing midnight is credited to the day
/// it finished.
pub fn local_date_key() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_shape() {
        let key = local_date_key();
        assert_eq!(key.len(), 10);
        assert_eq!(key.as_bytes()[4], b'-');
        assert_eq!(key.as_bytes()[7], b'-');
    }
}
