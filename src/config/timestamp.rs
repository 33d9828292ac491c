//! Build timestamps that honour `SOURCE_DATE_EPOCH`.

use chrono::{DateTime, Utc};

pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Timestamp from an epoch override, or the current time when the override
/// is absent or not a valid number of seconds.
pub fn timestamp_from(epoch: Option<&str>) -> DateTime<Utc> {
    epoch
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

pub fn source_timestamp() -> DateTime<Utc> {
    let epoch = std::env::var(SOURCE_DATE_EPOCH).ok();
    if let Some(raw) = epoch.as_deref() {
        tracing::trace!(epoch = raw, "using {SOURCE_DATE_EPOCH}");
    }
    timestamp_from(epoch.as_deref())
}

pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub fn format_clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// `YYYY-MM-DD` in UTC.
pub fn date_str() -> String {
    format_date(source_timestamp())
}

/// `HH:MM:SS` in UTC.
pub fn clock_str() -> String {
    format_clock(source_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_override_is_formatted_in_utc() {
        let at = timestamp_from(Some("1700000000"));
        assert_eq!(format_date(at), "2023-11-14");
        assert_eq!(format_clock(at), "22:13:20");
    }

    #[test]
    fn garbage_epoch_falls_back_to_now() {
        let before = Utc::now();
        let at = timestamp_from(Some("yesterday"));
        assert!(at >= before);
    }

    #[test]
    fn epoch_zero_is_unix_start() {
        let at = timestamp_from(Some(" 0 "));
        assert_eq!(format_date(at), "1970-01-01");
        assert_eq!(format_clock(at), "00:00:00");
    }
}
