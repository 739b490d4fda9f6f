use contracts::dashboards::d400_ecommerce_overview::palette::{
    CATEGORY_ITEMS_N, CATEGORY_REVIEWS_N, TOP_SELLERS_N,
};
use contracts::dashboards::d400_ecommerce_overview::{
    DashboardCharts, DashboardMetrics, DashboardResponse, DashboardSummaries, DashboardWarning,
    RecordsPage,
};
use contracts::shared::date_range::DateRange;
use contracts::shared::format::CurrencyFormat;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::aggregations;
use super::filter::filter_by_range;
use crate::domain::a001_order_line::Dataset;

pub const DEFAULT_PAGE_LIMIT: usize = 100;
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Filter the session table and compute every dashboard block
pub fn build_dashboard(
    session_id: Uuid,
    dataset: &Dataset,
    range: &DateRange,
    currency: &CurrencyFormat,
) -> DashboardResponse {
    let rows = filter_by_range(&dataset.records, range);
    let summaries = aggregations::summarize(&rows);

    let mut warnings = Vec::new();
    if rows.is_empty() {
        tracing::warn!(
            "Session {}: no rows between {} and {}",
            session_id,
            range.start,
            range.end
        );
        warnings.push(DashboardWarning::EmptyResult);
    }

    let charts = build_charts(&summaries);
    let metrics = build_metrics(&summaries, currency);

    tracing::debug!(
        "Session {}: {} of {} rows in window, {} months",
        session_id,
        rows.len(),
        dataset.len(),
        summaries.monthly_orders.len()
    );

    DashboardResponse {
        session_id,
        filter: *range,
        row_count: rows.len(),
        summaries,
        charts,
        metrics,
        warnings,
    }
}

/// Slices drawn on the bar charts
pub fn build_charts(summaries: &DashboardSummaries) -> DashboardCharts {
    let mut by_items = summaries.sellers.clone();
    by_items.sort_by(|a, b| b.order_item_total.cmp(&a.order_item_total));
    by_items.truncate(TOP_SELLERS_N);

    // category_items is sorted descending, so the worst sellers sit at the tail
    let best_selling_categories = head(&summaries.category_items, CATEGORY_ITEMS_N);
    let worst_selling_categories = summaries
        .category_items
        .iter()
        .rev()
        .take(CATEGORY_ITEMS_N)
        .cloned()
        .collect();

    // category_reviews is sorted ascending
    let best_reviewed_categories = summaries
        .category_reviews
        .iter()
        .rev()
        .take(CATEGORY_REVIEWS_N)
        .cloned()
        .collect();
    let worst_reviewed_categories = head(&summaries.category_reviews, CATEGORY_REVIEWS_N);

    let mut customers_by_state = summaries.customers_by_state.clone();
    customers_by_state.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));

    DashboardCharts {
        top_sellers_by_items: by_items,
        top_sellers_by_revenue: head(&summaries.sellers, TOP_SELLERS_N),
        best_selling_categories,
        worst_selling_categories,
        best_reviewed_categories,
        worst_reviewed_categories,
        customers_by_state,
        sellers_by_state: summaries.sellers_by_state.clone(),
    }
}

/// Total orders and revenue, summed over the monthly buckets
pub fn build_metrics(summaries: &DashboardSummaries, currency: &CurrencyFormat) -> DashboardMetrics {
    let total_orders: u64 = summaries.monthly_orders.iter().map(|m| m.order_count).sum();
    let total_revenue: Decimal = summaries.monthly_orders.iter().map(|m| m.revenue).sum();

    DashboardMetrics {
        total_orders,
        total_orders_display: currency.format_count(total_orders),
        total_revenue,
        total_revenue_display: currency.format(total_revenue),
        currency: currency.clone(),
    }
}

/// Page of the raw filtered table for the detailed data view
pub fn records_page(
    dataset: &Dataset,
    range: &DateRange,
    offset: Option<usize>,
    limit: Option<usize>,
) -> RecordsPage {
    let rows = filter_by_range(&dataset.records, range);
    let offset = offset.unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);

    RecordsPage {
        total: rows.len(),
        offset,
        limit,
        rows: rows.into_iter().skip(offset).take(limit).cloned().collect(),
    }
}

fn head<T: Clone>(rows: &[T], n: usize) -> Vec<T> {
    rows.iter().take(n).cloned().collect()
}
