use contracts::domain::a001_order_line::OrderLineRecord;
use contracts::shared::date_range::DateRange;

/// Rows whose approval timestamp falls inside `range` (inclusive)
///
/// Rows without an approval timestamp never match. An inverted range
/// yields an empty result.
pub fn filter_by_range<'a>(
    records: &'a [OrderLineRecord],
    range: &DateRange,
) -> Vec<&'a OrderLineRecord> {
    if range.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| {
            r.order_approved_at
                .as_ref()
                .is_some_and(|ts| range.contains(ts))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(order_id: &str, approved: Option<(i32, u32, u32, u32)>) -> OrderLineRecord {
        OrderLineRecord {
            order_id: order_id.to_string(),
            order_item_id: Some(1),
            seller_id: "s1".to_string(),
            customer_id: "c1".to_string(),
            product_category_name: None,
            customer_state: "SP".to_string(),
            seller_state: "SP".to_string(),
            payment_value: None,
            review_score: None,
            order_approved_at: approved.map(|(y, m, d, h)| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap()
            }),
            order_delivered_customer_date: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let records = vec![
            record("before", Some((2017, 12, 31, 23))),
            record("first_day", Some((2018, 1, 1, 0))),
            record("last_day", Some((2018, 1, 31, 22))),
            record("after", Some((2018, 2, 1, 0))),
            record("no_date", None),
        ];
        let range = DateRange::from_dates(date(2018, 1, 1), date(2018, 1, 31));

        let ids: Vec<&str> = filter_by_range(&records, &range)
            .iter()
            .map(|r| r.order_id.as_str())
            .collect();
        assert_eq!(ids, vec!["first_day", "last_day"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let records = vec![record("a", Some((2018, 1, 10, 12)))];
        let range = DateRange::from_dates(date(2018, 2, 1), date(2018, 1, 1));
        assert!(filter_by_range(&records, &range).is_empty());
    }
}
