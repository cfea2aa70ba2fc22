use chrono::NaiveDate;

use crate::columns::{ColumnDescriptor, ColumnOrder};

/// Marker rendered for null fields and unparseable derived values.
pub const NULL_MARKER: &str = "∅";

/// Date formats accepted for "Registered Date" values.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Default header order. Keys are stable cell identifiers, labels the
/// header text.
pub fn default_columns() -> ColumnOrder {
    ColumnOrder::new(vec![
        ColumnDescriptor::new("id", "ID"),
        ColumnDescriptor::new("first_name", "First Name"),
        ColumnDescriptor::new("last_name", "Last Name"),
        ColumnDescriptor::new("full_name", "Full Name"),
        ColumnDescriptor::new("email", "Email"),
        ColumnDescriptor::new("city", "City"),
        ColumnDescriptor::new("registered_date", "Registered Date"),
        ColumnDescriptor::new("dsr", "Days Since Registered"),
    ])
}

/// One source record, field names as in the CSV header. Nulls have
/// already been replaced by the null marker at load time.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub registered_date: String,
}

/// One display record with the fixed cell key set. The day count is not
/// stored: it is evaluated against the wall-clock date at lookup time,
/// so its rendering can change across a midnight boundary within one
/// session.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub city: String,
    pub registered_date: String,
}

impl DisplayRow {
    pub fn from_record(record: RawRecord) -> Self {
        let full_name = format!("{} {}", record.first_name, record.last_name);
        DisplayRow {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            full_name,
            email: record.email,
            city: record.city,
            registered_date: record.registered_date,
        }
    }

    /// Whole days elapsed since the registration date, negative for
    /// future dates. None when the date string does not parse.
    pub fn days_since_registered(&self, today: NaiveDate) -> Option<i64> {
        let registered = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&self.registered_date, fmt).ok())?;
        Some((today - registered).num_days())
    }

    /// Cell content for a column key. Unknown keys and unparseable day
    /// counts render as the null marker rather than failing.
    pub fn cell(&self, key: &str, today: NaiveDate) -> String {
        match key {
            "id" => self.id.clone(),
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "full_name" => self.full_name.clone(),
            "email" => self.email.clone(),
            "city" => self.city.clone(),
            "registered_date" => self.registered_date.clone(),
            "dsr" => self
                .days_since_registered(today)
                .map(|d| d.to_string())
                .unwrap_or_else(|| NULL_MARKER.to_string()),
            _ => NULL_MARKER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn record(first: &str, last: &str, registered: &str) -> RawRecord {
        RawRecord {
            id: "1".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: "a@x.com".to_string(),
            city: "Lima".to_string(),
            registered_date: registered.to_string(),
        }
    }

    #[test]
    fn full_name_joins_first_and_last_with_a_space() {
        let row = DisplayRow::from_record(record("Ann", "Lee", "2024-01-01"));
        assert_eq!(row.full_name, "Ann Lee");
    }

    #[test]
    fn day_count_for_today_is_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let row = DisplayRow::from_record(record("Bo", "Ray", "2026-03-15"));
        assert_eq!(row.days_since_registered(today), Some(0));
        assert_eq!(row.cell("dsr", today), "0");
    }

    #[test]
    fn day_count_for_ten_days_ago_is_ten() {
        let today = Local::now().date_naive();
        let registered = (today - Duration::days(10)).format("%Y-%m-%d").to_string();
        let row = DisplayRow::from_record(record("Ann", "Lee", &registered));
        assert_eq!(row.days_since_registered(today), Some(10));
    }

    #[test]
    fn day_count_for_future_date_is_negative() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let row = DisplayRow::from_record(record("Bo", "Ray", "2026-03-20"));
        assert_eq!(row.days_since_registered(today), Some(-5));
    }

    #[test]
    fn slash_separated_dates_parse() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let row = DisplayRow::from_record(record("Bo", "Ray", "2026/03/14"));
        assert_eq!(row.days_since_registered(today), Some(1));
    }

    #[test]
    fn unparseable_date_renders_as_null_marker() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let row = DisplayRow::from_record(record("Bo", "Ray", "not a date"));
        assert_eq!(row.days_since_registered(today), None);
        assert_eq!(row.cell("dsr", today), NULL_MARKER);
    }

    #[test]
    fn cell_lookup_covers_the_default_columns() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let row = DisplayRow::from_record(record("Ann", "Lee", "2026-03-15"));
        for descriptor in default_columns().descriptors() {
            assert_ne!(row.cell(&descriptor.key, today), "", "{}", descriptor.key);
        }
    }

    #[test]
    fn unknown_key_renders_as_null_marker() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let row = DisplayRow::from_record(record("Ann", "Lee", "2026-03-15"));
        assert_eq!(row.cell("nope", today), NULL_MARKER);
    }
}
