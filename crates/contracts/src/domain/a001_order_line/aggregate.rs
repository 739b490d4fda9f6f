use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column names the flat dataset must provide (order is irrelevant)
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "order_id",
    "order_item_id",
    "seller_id",
    "customer_id",
    "product_category_name",
    "customer_state",
    "seller_state",
    "payment_value",
    "review_score",
    "order_approved_at",
    "order_delivered_customer_date",
];

/// Одна строка заказа (позиция) из объединённого датасета
///
/// `order_id` is not unique: an order with several items yields several rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub order_id: String,

    /// Sequence number of the item inside its order; `None` contributes
    /// zero to sums
    pub order_item_id: Option<i64>,

    pub seller_id: String,
    pub customer_id: String,

    /// `None` when the source cell is empty; such rows are skipped by
    /// category groupings
    pub product_category_name: Option<String>,

    pub customer_state: String,
    pub seller_state: String,

    /// Payment amount; `None` contributes zero to sums
    pub payment_value: Option<Decimal>,

    /// Review rating; `None` contributes zero to sums
    pub review_score: Option<f64>,

    pub order_approved_at: Option<NaiveDateTime>,
    pub order_delivered_customer_date: Option<NaiveDateTime>,
}

impl OrderLineRecord {
    pub fn items_or_zero(&self) -> i64 {
        self.order_item_id.unwrap_or(0)
    }

    pub fn payment_or_zero(&self) -> Decimal {
        self.payment_value.unwrap_or(Decimal::ZERO)
    }

    pub fn review_or_zero(&self) -> f64 {
        self.review_score.unwrap_or(0.0)
    }

    /// Category name, treating an empty string the same as a missing value
    pub fn category(&self) -> Option<&str> {
        self.product_category_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}
