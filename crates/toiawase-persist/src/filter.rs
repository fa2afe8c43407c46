//! Query building for listings and exports.
//!
//! Request parameters arrive as loose strings. [`MessageFilter`] is the
//! validated form every [`MessageStore`](crate::MessageStore) understands:
//! an optional exact name and an optional inclusive lower bound on
//! `created_at`. Results are always ordered newest first, whatever the
//! filter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Asia::Tokyo;
use serde::Deserialize;

use crate::models::DBMessage;

/// Naive date-times are read as wall-clock time in Tokyo.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Raw filter parameters as they appear in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageQuery {
    pub name: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Exact, case-sensitive match on `name`.
    pub name: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub created_after: Option<DateTime<Utc>>,
}

impl MessageFilter {
    /// Unfiltered query: every record, newest first.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_params(name: Option<&str>, after: Option<&str>) -> Self {
        let name = name.filter(|n| !n.is_empty()).map(str::to_string);
        let created_after = after.and_then(|raw| {
            let parsed = parse_after(raw);
            if parsed.is_none() {
                tracing::debug!(after = %raw, "Ignoring unparseable date filter");
            }
            parsed
        });

        Self {
            name,
            created_after,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_created_after(mut self, after: DateTime<Utc>) -> Self {
        self.created_after = Some(floor_to_millis(after));
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.name.is_none() && self.created_after.is_none()
    }

    pub fn matches(&self, message: &DBMessage) -> bool {
        if let Some(name) = &self.name {
            if message.name != *name {
                return false;
            }
        }
        if let Some(after) = self.created_after {
            if message.created_at < after {
                return false;
            }
        }
        true
    }
}

impl From<&MessageQuery> for MessageFilter {
    fn from(query: &MessageQuery) -> Self {
        Self::from_params(query.name.as_deref(), query.after.as_deref())
    }
}

impl From<MessageQuery> for MessageFilter {
    fn from(query: MessageQuery) -> Self {
        Self::from(&query)
    }
}

/// Parse the `after` parameter.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` (midnight UTC), naive
/// date-times (Tokyo wall clock) and `YYYY/MM/DD` (midnight Tokyo).
/// Returns `None` for anything else, including blank input.
///
/// The bound is floored to whole milliseconds, the resolution stored
/// timestamps have.
pub fn parse_after(raw: &str) -> Option<DateTime<Utc>> {
    parse_after_exact(raw).map(floor_to_millis)
}

fn parse_after_exact(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tokyo_to_utc(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return date.and_hms_opt(0, 0, 0).and_then(tokyo_to_utc);
    }

    None
}

fn floor_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}

fn tokyo_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Tokyo
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewMessage;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_after_rfc3339() {
        assert_eq!(
            parse_after("2024-05-01T10:00:00Z"),
            Some(utc(2024, 5, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_after("2024-05-01T10:00:00+09:00"),
            Some(utc(2024, 5, 1, 1, 0, 0))
        );
        assert_eq!(
            parse_after("2024-05-01T10:00:00.250Z").map(|d| d.timestamp_millis() % 1000),
            Some(250)
        );
    }

    #[test]
    fn test_parse_after_date_only_is_utc_midnight() {
        assert_eq!(parse_after("2024-05-01"), Some(utc(2024, 5, 1, 0, 0, 0)));
    }

    #[test]
    fn test_parse_after_naive_is_tokyo() {
        assert_eq!(
            parse_after("2024-05-01T09:30"),
            Some(utc(2024, 5, 1, 0, 30, 0))
        );
        assert_eq!(
            parse_after("2024-05-01 09:30:15"),
            Some(utc(2024, 5, 1, 0, 30, 15))
        );
        assert_eq!(parse_after("2024/05/01"), Some(utc(2024, 4, 30, 15, 0, 0)));
    }

    #[test]
    fn test_sub_millisecond_bound_is_floored() {
        let bound = parse_after("2024-05-01T00:00:00.0005Z").unwrap();
        assert_eq!(bound, utc(2024, 5, 1, 0, 0, 0));

        let stamped = NewMessage::new("Alice", "a")
            .created_at(utc(2024, 5, 1, 0, 0, 0))
            .into_message("1");
        let filter = MessageFilter::from_params(None, Some("2024-05-01T00:00:00.0005Z"));
        assert!(filter.matches(&stamped));

        let nanos = utc(2024, 5, 1, 0, 0, 0) + chrono::Duration::nanoseconds(1_500_000);
        let built = MessageFilter::all().with_created_after(nanos);
        assert_eq!(
            built.created_after,
            Some(utc(2024, 5, 1, 0, 0, 0) + chrono::Duration::milliseconds(1))
        );
    }

    #[test]
    fn test_parse_after_rejects_garbage() {
        assert_eq!(parse_after(""), None);
        assert_eq!(parse_after("   "), None);
        assert_eq!(parse_after("yesterday"), None);
        assert_eq!(parse_after("2024-13-45"), None);
    }

    #[test]
    fn test_filter_from_params() {
        let filter = MessageFilter::from_params(Some("Alice"), Some("2024-05-01"));
        assert_eq!(filter.name.as_deref(), Some("Alice"));
        assert_eq!(filter.created_after, Some(utc(2024, 5, 1, 0, 0, 0)));

        let empty = MessageFilter::from_params(Some(""), None);
        assert!(empty.is_unfiltered());
    }

    #[test]
    fn test_invalid_after_is_same_as_absent() {
        let with_garbage = MessageFilter::from_params(Some("Bob"), Some("not-a-date"));
        let without = MessageFilter::from_params(Some("Bob"), None);
        assert_eq!(with_garbage, without);
    }

    #[test]
    fn test_filter_matches() {
        let t1 = utc(2024, 5, 1, 0, 0, 0);
        let t2 = utc(2024, 6, 1, 0, 0, 0);
        let alice = NewMessage::new("Alice", "a").created_at(t1).into_message("1");
        let bob = NewMessage::new("Bob", "b").created_at(t2).into_message("2");

        let by_name = MessageFilter::all().with_name("Alice");
        assert!(by_name.matches(&alice));
        assert!(!by_name.matches(&bob));

        // exact match only
        let lower = MessageFilter::all().with_name("alice");
        assert!(!lower.matches(&alice));

        let since_t2 = MessageFilter::all().with_created_after(t2);
        assert!(!since_t2.matches(&alice));
        assert!(since_t2.matches(&bob));

        assert!(MessageFilter::all().matches(&alice));
    }

    #[test]
    fn test_query_conversion() {
        let query = MessageQuery {
            name: Some("Tanaka".to_string()),
            after: Some("garbage".to_string()),
        };
        let filter = MessageFilter::from(&query);
        assert_eq!(filter.name.as_deref(), Some("Tanaka"));
        assert!(filter.created_after.is_none());
    }
}
