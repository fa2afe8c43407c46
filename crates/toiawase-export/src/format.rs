use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Every exported timestamp is rendered in this zone.
pub const EXPORT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// `2024/05/01 09:03:07`
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&EXPORT_TIMEZONE)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Calendar date of `now` in the export zone; used in titles and file names.
pub fn export_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&EXPORT_TIMEZONE).date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// `messages_2024-05-01.csv`
    pub fn file_name(self, date: NaiveDate) -> String {
        format!("messages_{}.{}", date.format("%Y-%m-%d"), self.extension())
    }

    pub fn content_disposition(self, date: NaiveDate) -> String {
        format!("attachment; filename=\"{}\"", self.file_name(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_in_tokyo() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 3, 7).unwrap();
        assert_eq!(format_timestamp(&ts), "2024/05/01 09:03:07");
    }

    #[test]
    fn test_format_timestamp_crosses_date_line() {
        let ts = Utc.with_ymd_and_hms(2023, 12, 31, 16, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024/01/01 01:00:00");
    }

    #[test]
    fn test_export_date_uses_tokyo_calendar() {
        let late_utc = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();
        assert_eq!(export_date(late_utc), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(ExportFormat::Csv.file_name(date), "messages_2024-05-01.csv");
        assert_eq!(
            ExportFormat::Pdf.content_disposition(date),
            "attachment; filename=\"messages_2024-05-01.pdf\""
        );
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }
}
