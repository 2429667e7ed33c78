use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Wire shape of a time slot nested under an availability rule.
///
/// Every field is optional: a fully empty record means "available all day"
/// for a fixed single date, a day-of-week-only record means "available all
/// day on that weekday", and datetime listings fill `start_time`/`capacity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// All seven weekdays in wire order. 0 is Sunday.
pub const ALL_WEEKDAYS: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Numeric day-of-week with Sunday as 0, matching the wire contract.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn weekday_label(day: u8) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

/// Distinct weekdays present between `from` and `to` inclusive, ascending.
///
/// Ranges of a week or longer contain every weekday, so the walk is bounded.
pub fn weekdays_in_range(from: NaiveDate, to: NaiveDate) -> Vec<u8> {
    if from > to {
        return Vec::new();
    }
    if (to - from).num_days() >= 6 {
        return ALL_WEEKDAYS.to_vec();
    }
    let mut days = Vec::new();
    let mut cursor = from;
    while cursor <= to {
        let day = day_of_week(cursor);
        if !days.contains(&day) {
            days.push(day);
        }
        cursor += Duration::days(1);
    }
    days.sort_unstable();
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_record_serializes_as_empty_object() {
        let json = serde_json::to_string(&TimeSlotRecord::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn start_time_serializes_without_date_or_offset() {
        let record = TimeSlotRecord {
            day_of_week: Some(2),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            capacity: Some(4),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["start_time"], "09:00:00");
    }

    #[test]
    fn sunday_is_day_zero() {
        // 2025-06-01 is a Sunday.
        assert_eq!(day_of_week(date(2025, 6, 1)), 0);
        assert_eq!(day_of_week(date(2025, 6, 2)), 1);
    }

    #[test]
    fn full_week_range_contains_every_weekday() {
        let days = weekdays_in_range(date(2025, 6, 2), date(2025, 6, 8));
        assert_eq!(days, ALL_WEEKDAYS.to_vec());
    }

    #[test]
    fn short_range_contains_only_its_weekdays() {
        // Monday through Wednesday.
        let days = weekdays_in_range(date(2025, 6, 2), date(2025, 6, 4));
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(weekdays_in_range(date(2025, 6, 8), date(2025, 6, 2)).is_empty());
    }
}
