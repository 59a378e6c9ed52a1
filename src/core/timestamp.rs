//! Timestamp rendering for writer output

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const DATE_TIME: &str = "%Y/%m/%d %H:%M:%S";

/// How a writer renders an envelope's timestamp
///
/// # Examples
///
/// ```
/// use fanout_logger::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// assert!(format.format(&Utc::now()).ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local date and time: `2025/01/08 10:30:45`
    #[default]
    DateTime,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 in UTC: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Custom strftime format, rendered in local time
    ///
    /// An invalid format string renders as [`TimestampFormat::DateTime`].
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::DateTime => datetime.with_timezone(&Local).format(DATE_TIME).to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Custom(format_str) => {
                let local = datetime.with_timezone(&Local);
                let mut rendered = String::new();
                // chrono reports an unknown specifier as a fmt::Error
                match write!(rendered, "{}", local.format(format_str)) {
                    Ok(()) => rendered,
                    Err(_) => local.format(DATE_TIME).to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_unix_format() {
        let result = TimestampFormat::Unix.format(&fixed_datetime());
        assert_eq!(result, "1736332245");
    }

    #[test]
    fn test_datetime_format_shape() {
        // Local offset varies by machine; check the layout only.
        let result = TimestampFormat::DateTime.format(&fixed_datetime());
        assert_eq!(result.len(), "2025/01/08 10:30:45".len());
        assert_eq!(&result[4..5], "/");
        assert_eq!(&result[10..11], " ");
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025");
    }

    #[test]
    fn test_invalid_custom_format_falls_back() {
        let datetime = fixed_datetime();
        let format = TimestampFormat::Custom("%Q".to_string());
        let rendered = std::panic::catch_unwind(|| format.format(&datetime))
            .expect("invalid format must not panic");
        assert_eq!(rendered, TimestampFormat::DateTime.format(&datetime));
    }
}
