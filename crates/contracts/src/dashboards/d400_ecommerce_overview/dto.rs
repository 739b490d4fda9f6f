use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_order_line::OrderLineRecord;
use crate::shared::date_range::{DateBounds, DateRange};
use crate::shared::format::CurrencyFormat;

/// Sum of `order_item_id` and payment per seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerSummaryRow {
    pub seller_id: String,
    pub order_item_total: i64,
    pub payment_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItemCountRow {
    pub product_category_name: String,
    pub order_item_total: i64,
}

/// One calendar month bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyOrdersRow {
    /// Period in format "YYYY-MM"
    pub month: String,
    /// Distinct `order_id` values in the month
    pub order_count: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReviewRow {
    pub product_category_name: String,
    pub review_score_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomersByStateRow {
    pub customer_state: String,
    pub customer_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellersByStateRow {
    pub seller_state: String,
    pub seller_count: u64,
}

/// The six summary tables computed from one filtered table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummaries {
    /// Sorted descending by `payment_total`
    pub sellers: Vec<SellerSummaryRow>,
    /// Sorted descending by `order_item_total`
    pub category_items: Vec<CategoryItemCountRow>,
    /// Chronological
    pub monthly_orders: Vec<MonthlyOrdersRow>,
    /// Sorted ascending by `review_score_total`
    pub category_reviews: Vec<CategoryReviewRow>,
    /// Ordered by state code
    pub customers_by_state: Vec<CustomersByStateRow>,
    /// Sorted descending by `seller_count`
    pub sellers_by_state: Vec<SellersByStateRow>,
}

impl DashboardSummaries {
    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
            && self.category_items.is_empty()
            && self.monthly_orders.is_empty()
            && self.category_reviews.is_empty()
            && self.customers_by_state.is_empty()
            && self.sellers_by_state.is_empty()
    }
}

/// Срезы таблиц, которые рисуются на графиках (top-N / bottom-N)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub top_sellers_by_items: Vec<SellerSummaryRow>,
    pub top_sellers_by_revenue: Vec<SellerSummaryRow>,
    pub best_selling_categories: Vec<CategoryItemCountRow>,
    pub worst_selling_categories: Vec<CategoryItemCountRow>,
    pub best_reviewed_categories: Vec<CategoryReviewRow>,
    pub worst_reviewed_categories: Vec<CategoryReviewRow>,
    pub customers_by_state: Vec<CustomersByStateRow>,
    pub sellers_by_state: Vec<SellersByStateRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_orders: u64,
    pub total_orders_display: String,
    pub total_revenue: Decimal,
    pub total_revenue_display: String,
    /// Display rules the UI reuses for per-bar and per-point labels
    pub currency: CurrencyFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardWarning {
    /// The active date window matched no rows; every summary is empty
    EmptyResult,
}

impl DashboardWarning {
    pub fn message(&self) -> &'static str {
        match self {
            DashboardWarning::EmptyResult => "No orders were approved in the selected period",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub session_id: Uuid,
    pub filter: DateRange,
    /// Rows inside the filter window
    pub row_count: usize,
    pub summaries: DashboardSummaries,
    pub charts: DashboardCharts,
    pub metrics: DashboardMetrics,
    pub warnings: Vec<DashboardWarning>,
}

/// Состояние сессии дашборда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    /// Dataset location the session was loaded from
    pub source: String,
    pub total_rows: usize,
    pub bounds: DateBounds,
    pub filter: Option<DateRange>,
    pub created_at: DateTime<Utc>,
}

/// Date filter as picked in the UI, dates in format "YYYY-MM-DD"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilterRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl DateFilterRequest {
    pub fn to_range(&self) -> DateRange {
        DateRange::from_dates(self.date_from, self.date_to)
    }
}

/// Page of the raw filtered table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsPage {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub rows: Vec<OrderLineRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_request_from_ui_json() {
        let request: DateFilterRequest =
            serde_json::from_str(r#"{"date_from":"2018-01-01","date_to":"2018-01-31"}"#).unwrap();
        let range = request.to_range();

        assert_eq!(range.start_date(), NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(range.end_date(), NaiveDate::from_ymd_opt(2018, 1, 31).unwrap());
    }

    #[test]
    fn test_filter_request_rejects_bad_date() {
        let result = serde_json::from_str::<DateFilterRequest>(
            r#"{"date_from":"2018-13-01","date_to":"2018-01-31"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_warning_is_tagged() {
        let json = serde_json::to_string(&DashboardWarning::EmptyResult).unwrap();
        assert_eq!(json, r#"{"kind":"empty_result"}"#);
    }

    #[test]
    fn test_summaries_is_empty() {
        let mut summaries = DashboardSummaries::default();
        assert!(summaries.is_empty());

        summaries.sellers_by_state.push(SellersByStateRow {
            seller_state: "SP".to_string(),
            seller_count: 1,
        });
        assert!(!summaries.is_empty());
    }
}
