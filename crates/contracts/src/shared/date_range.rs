use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Inclusive interval of approval timestamps
///
/// An interval with `start > end` is valid and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Widen a calendar-date pair so the whole `end_date` day is included
    ///
    /// The last representable date saturates at `NaiveDateTime::MAX`.
    pub fn from_dates(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let start = start_date.and_time(NaiveTime::MIN);
        let end = end_date
            .succ_opt()
            .and_then(|next| next.and_time(NaiveTime::MIN).checked_sub_signed(Duration::nanoseconds(1)))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start <= *ts && *ts <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }
}

/// Observed min/max approval dates of a loaded table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    /// Default filter for a fresh session: `[min, max]` as whole days
    pub fn to_range(&self) -> Option<DateRange> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(DateRange::from_dates(min, max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_dates_includes_whole_end_day() {
        let range = DateRange::from_dates(date(2018, 1, 1), date(2018, 1, 31));
        let late = date(2018, 1, 31).and_hms_opt(23, 59, 59).unwrap();
        let next = date(2018, 2, 1).and_hms_opt(0, 0, 0).unwrap();

        assert!(range.contains(&range.start));
        assert!(range.contains(&late));
        assert!(!range.contains(&next));
        assert_eq!(range.end_date(), date(2018, 1, 31));
    }

    #[test]
    fn test_from_dates_at_calendar_limits() {
        let range = DateRange::from_dates(date(2018, 1, 1), NaiveDate::MAX);
        assert_eq!(range.end, NaiveDateTime::MAX);
        assert_eq!(range.end_date(), NaiveDate::MAX);
        assert!(range.contains(&date(2018, 6, 1).and_hms_opt(0, 0, 0).unwrap()));

        let range = DateRange::from_dates(NaiveDate::MIN, NaiveDate::MIN);
        assert!(!range.is_empty());
        assert_eq!(range.start_date(), NaiveDate::MIN);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::from_dates(date(2018, 2, 1), date(2018, 1, 1));
        assert!(range.is_empty());
        assert!(!range.contains(&date(2018, 1, 15).and_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_bounds_without_dates_have_no_range() {
        assert_eq!(DateBounds::default().to_range(), None);

        let bounds = DateBounds {
            min: Some(date(2017, 1, 5)),
            max: Some(date(2018, 8, 29)),
        };
        let range = bounds.to_range().unwrap();
        assert_eq!(range.start_date(), date(2017, 1, 5));
        assert_eq!(range.end_date(), date(2018, 8, 29));
    }
}
