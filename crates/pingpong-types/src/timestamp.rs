//! ISO-8601 timestamps for response payloads.

use chrono::{SecondsFormat, Utc};

/// Returns the current UTC time, e.g. `2026-10-16T07:39:00.123Z`.
pub fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_utc_with_millis() {
        let ts = now();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2026-10-16T07:39:00.123Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
