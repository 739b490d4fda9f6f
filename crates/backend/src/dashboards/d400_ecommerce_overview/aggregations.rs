//! Group-by aggregations over the filtered order lines
//!
//! Every function is independent and recomputes its table from scratch.
//! Groups are collected in a `BTreeMap` and then stable-sorted, so rows with
//! equal totals stay ordered by group key. Empty category and state keys
//! are treated like missing values and dropped, as are empty identifiers in
//! distinct counts. Sellers keep an empty id as its own `""` group so the
//! seller totals always add up to the input.

use chrono::Datelike;
use contracts::dashboards::d400_ecommerce_overview::{
    CategoryItemCountRow, CategoryReviewRow, CustomersByStateRow, DashboardSummaries,
    MonthlyOrdersRow, SellerSummaryRow, SellersByStateRow,
};
use contracts::domain::a001_order_line::OrderLineRecord;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

fn non_empty(key: &str) -> Option<&str> {
    (!key.is_empty()).then_some(key)
}

/// Items and revenue per seller, highest revenue first
pub fn sellers_summary(rows: &[&OrderLineRecord]) -> Vec<SellerSummaryRow> {
    let mut groups: BTreeMap<&str, (i64, Decimal)> = BTreeMap::new();
    for row in rows {
        let entry = groups
            .entry(row.seller_id.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += row.items_or_zero();
        entry.1 += row.payment_or_zero();
    }

    let mut result: Vec<SellerSummaryRow> = groups
        .into_iter()
        .map(|(seller_id, (items, payment))| SellerSummaryRow {
            seller_id: seller_id.to_string(),
            order_item_total: items,
            payment_total: payment,
        })
        .collect();
    result.sort_by(|a, b| b.payment_total.cmp(&a.payment_total));
    result
}

/// Sum of `order_item_id` per product category, largest first
pub fn category_item_counts(rows: &[&OrderLineRecord]) -> Vec<CategoryItemCountRow> {
    let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
    for row in rows {
        if let Some(category) = row.category() {
            *groups.entry(category).or_insert(0) += row.items_or_zero();
        }
    }

    let mut result: Vec<CategoryItemCountRow> = groups
        .into_iter()
        .map(|(category, total)| CategoryItemCountRow {
            product_category_name: category.to_string(),
            order_item_total: total,
        })
        .collect();
    result.sort_by(|a, b| b.order_item_total.cmp(&a.order_item_total));
    result
}

/// Distinct orders and revenue per calendar month of approval
///
/// Only months with at least one row produce a bucket.
pub fn monthly_orders(rows: &[&OrderLineRecord]) -> Vec<MonthlyOrdersRow> {
    let mut buckets: BTreeMap<(i32, u32), (HashSet<&str>, Decimal)> = BTreeMap::new();
    for row in rows {
        let Some(approved) = row.order_approved_at else {
            continue;
        };
        let bucket = buckets
            .entry((approved.year(), approved.month()))
            .or_insert_with(|| (HashSet::new(), Decimal::ZERO));
        if let Some(order_id) = non_empty(&row.order_id) {
            bucket.0.insert(order_id);
        }
        bucket.1 += row.payment_or_zero();
    }

    buckets
        .into_iter()
        .map(|((year, month), (orders, revenue))| MonthlyOrdersRow {
            month: format!("{:04}-{:02}", year, month),
            order_count: orders.len() as u64,
            revenue,
        })
        .collect()
}

/// Sum of review scores per product category, lowest first
pub fn category_review_sums(rows: &[&OrderLineRecord]) -> Vec<CategoryReviewRow> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        if let Some(category) = row.category() {
            *groups.entry(category).or_insert(0.0) += row.review_or_zero();
        }
    }

    let mut result: Vec<CategoryReviewRow> = groups
        .into_iter()
        .map(|(category, total)| CategoryReviewRow {
            product_category_name: category.to_string(),
            review_score_total: total,
        })
        .collect();
    result.sort_by(|a, b| a.review_score_total.total_cmp(&b.review_score_total));
    result
}

/// Distinct customers per customer state, ordered by state code
pub fn customers_by_state(rows: &[&OrderLineRecord]) -> Vec<CustomersByStateRow> {
    distinct_by_key(rows, |r| &r.customer_state, |r| &r.customer_id)
        .into_iter()
        .map(|(state, count)| CustomersByStateRow {
            customer_state: state.to_string(),
            customer_count: count,
        })
        .collect()
}

/// Distinct sellers per seller state, most sellers first
pub fn sellers_by_state(rows: &[&OrderLineRecord]) -> Vec<SellersByStateRow> {
    let mut result: Vec<SellersByStateRow> =
        distinct_by_key(rows, |r| &r.seller_state, |r| &r.seller_id)
            .into_iter()
            .map(|(state, count)| SellersByStateRow {
                seller_state: state.to_string(),
                seller_count: count,
            })
            .collect();
    result.sort_by(|a, b| b.seller_count.cmp(&a.seller_count));
    result
}

fn distinct_by_key<'a>(
    rows: &[&'a OrderLineRecord],
    key: impl Fn(&'a OrderLineRecord) -> &'a String,
    value: impl Fn(&'a OrderLineRecord) -> &'a String,
) -> Vec<(&'a str, u64)> {
    let mut groups: BTreeMap<&'a str, HashSet<&'a str>> = BTreeMap::new();
    for row in rows.iter().copied() {
        let Some(group) = non_empty(key(row)) else {
            continue;
        };
        let members = groups.entry(group).or_default();
        if let Some(member) = non_empty(value(row)) {
            members.insert(member);
        }
    }

    groups
        .into_iter()
        .map(|(group, members)| (group, members.len() as u64))
        .collect()
}

/// All six summary tables for one filtered table
pub fn summarize(rows: &[&OrderLineRecord]) -> DashboardSummaries {
    DashboardSummaries {
        sellers: sellers_summary(rows),
        category_items: category_item_counts(rows),
        monthly_orders: monthly_orders(rows),
        category_reviews: category_review_sums(rows),
        customers_by_state: customers_by_state(rows),
        sellers_by_state: sellers_by_state(rows),
    }
}
