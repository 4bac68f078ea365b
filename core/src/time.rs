//! Time related utils.

use chrono::Utc;

/// DateTime used by the admin API, which is UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Get the current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into the `TresoritDate` header form: `2017-03-14T10:20:30Z`.
///
/// The admin API expects second precision and a literal `Z` suffix.
pub fn format_tresorit_date(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_tresorit_date() {
        let t = Utc.with_ymd_and_hms(2017, 3, 14, 10, 20, 30).unwrap();
        assert_eq!(format_tresorit_date(t), "2017-03-14T10:20:30Z");
    }

    #[test]
    fn test_format_tresorit_date_pads_components() {
        let t = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_tresorit_date(t), "2020-01-02T03:04:05Z");
    }
}
