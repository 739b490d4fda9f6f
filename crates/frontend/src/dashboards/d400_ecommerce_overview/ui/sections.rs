//! Перевод строк сводок в столбцы и точки графиков

use contracts::dashboards::d400_ecommerce_overview::{
    palette, CategoryItemCountRow, CategoryReviewRow, CustomersByStateRow, MonthlyOrdersRow,
    SellerSummaryRow, SellersByStateRow,
};
use contracts::domain::a001_order_line::OrderLineRecord;
use contracts::shared::format::CurrencyFormat;
use leptos::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::shared::components::bar_chart::ChartBar;
use crate::shared::components::line_chart::ChartPoint;

fn decimal_value(d: Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

pub fn sellers_by_items(rows: &[SellerSummaryRow]) -> Vec<ChartBar> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| ChartBar {
            label: r.seller_id.clone(),
            value: r.order_item_total as f64,
            display: r.order_item_total.to_string(),
            color: palette::palette_color(&palette::PALETTE_5, i),
        })
        .collect()
}

pub fn sellers_by_revenue(rows: &[SellerSummaryRow], currency: &CurrencyFormat) -> Vec<ChartBar> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| ChartBar {
            label: r.seller_id.clone(),
            value: decimal_value(r.payment_total),
            display: currency.format(r.payment_total),
            color: palette::palette_color(&palette::PALETTE_5, i),
        })
        .collect()
}

pub fn category_items(rows: &[CategoryItemCountRow]) -> Vec<ChartBar> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| ChartBar {
            label: r.product_category_name.clone(),
            value: r.order_item_total as f64,
            display: r.order_item_total.to_string(),
            color: palette::palette_color(&palette::PALETTE_10, i),
        })
        .collect()
}

pub fn category_reviews(rows: &[CategoryReviewRow]) -> Vec<ChartBar> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| ChartBar {
            label: r.product_category_name.clone(),
            value: r.review_score_total,
            display: format!("{:.1}", r.review_score_total),
            color: palette::palette_color(&palette::PALETTE_5, i),
        })
        .collect()
}

pub fn customers_by_state(rows: &[CustomersByStateRow]) -> Vec<ChartBar> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| ChartBar {
            label: r.customer_state.clone(),
            value: r.customer_count as f64,
            display: r.customer_count.to_string(),
            color: palette::highlight_first(i),
        })
        .collect()
}

pub fn sellers_by_state(rows: &[SellersByStateRow]) -> Vec<ChartBar> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| ChartBar {
            label: r.seller_state.clone(),
            value: r.seller_count as f64,
            display: r.seller_count.to_string(),
            color: palette::highlight_first(i),
        })
        .collect()
}

pub fn monthly_order_points(rows: &[MonthlyOrdersRow]) -> Vec<ChartPoint> {
    rows.iter()
        .map(|r| ChartPoint {
            label: r.month.clone(),
            value: r.order_count as f64,
            display: r.order_count.to_string(),
        })
        .collect()
}

pub fn monthly_revenue_points(
    rows: &[MonthlyOrdersRow],
    currency: &CurrencyFormat,
) -> Vec<ChartPoint> {
    rows.iter()
        .map(|r| ChartPoint {
            label: r.month.clone(),
            value: decimal_value(r.revenue),
            display: currency.format(r.revenue),
        })
        .collect()
}

fn optional_text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Detailed data view: one page of the filtered table
#[component]
pub fn RecordsTable(#[prop(into)] rows: Signal<Vec<OrderLineRecord>>) -> impl IntoView {
    view! {
        <div class="table-wrapper">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"order_id"</th>
                        <th>"order_item_id"</th>
                        <th>"seller_id"</th>
                        <th>"customer_id"</th>
                        <th>"product_category_name"</th>
                        <th>"customer_state"</th>
                        <th>"seller_state"</th>
                        <th class="text-right">"payment_value"</th>
                        <th class="text-right">"review_score"</th>
                        <th>"order_approved_at"</th>
                        <th>"order_delivered_customer_date"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get().into_iter().enumerate()
                        key=|(i, r)| (*i, r.order_id.clone(), r.order_item_id)
                        children=move |(_, r)| {
                            view! {
                                <tr>
                                    <td>{r.order_id}</td>
                                    <td>{optional_text(r.order_item_id.map(|v| v.to_string()))}</td>
                                    <td>{r.seller_id}</td>
                                    <td>{r.customer_id}</td>
                                    <td>{optional_text(r.product_category_name)}</td>
                                    <td>{r.customer_state}</td>
                                    <td>{r.seller_state}</td>
                                    <td class="text-right">
                                        {optional_text(r.payment_value.map(|v| v.to_string()))}
                                    </td>
                                    <td class="text-right">
                                        {optional_text(r.review_score.map(|v| v.to_string()))}
                                    </td>
                                    <td>
                                        {optional_text(
                                            r.order_approved_at
                                                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()),
                                        )}
                                    </td>
                                    <td>
                                        {optional_text(
                                            r.order_delivered_customer_date
                                                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()),
                                        )}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn seller(id: &str, items: i64, payment: &str) -> SellerSummaryRow {
        SellerSummaryRow {
            seller_id: id.to_string(),
            order_item_total: items,
            payment_total: Decimal::from_str(payment).unwrap(),
        }
    }

    #[test]
    fn test_sellers_by_revenue_uses_palette_and_currency() {
        let rows = vec![seller("S1", 3, "1500.5"), seller("S2", 1, "20")];
        let bars = sellers_by_revenue(&rows, &CurrencyFormat::brazilian_real());

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "S1");
        assert_eq!(bars[0].value, 1500.5);
        assert_eq!(bars[0].display, "R$ 1.500,50");
        assert_eq!(bars[0].color, palette::PALETTE_5[0]);
        assert_eq!(bars[1].color, palette::PALETTE_5[1]);
    }

    #[test]
    fn test_state_bars_highlight_first() {
        let rows = vec![
            SellersByStateRow {
                seller_state: "SP".to_string(),
                seller_count: 3,
            },
            SellersByStateRow {
                seller_state: "RJ".to_string(),
                seller_count: 1,
            },
        ];
        let bars = sellers_by_state(&rows);

        assert_eq!(bars[0].color, palette::HIGHLIGHT_COLOR);
        assert_eq!(bars[1].color, palette::MUTED_COLOR);
        assert_eq!(bars[1].display, "1");
    }

    #[test]
    fn test_monthly_points_keep_order() {
        let rows = vec![
            MonthlyOrdersRow {
                month: "2018-01".to_string(),
                order_count: 2,
                revenue: Decimal::from_str("10.5").unwrap(),
            },
            MonthlyOrdersRow {
                month: "2018-03".to_string(),
                order_count: 1,
                revenue: Decimal::from_str("4").unwrap(),
            },
        ];

        let orders = monthly_order_points(&rows);
        assert_eq!(orders[0].label, "2018-01");
        assert_eq!(orders[1].value, 1.0);

        let revenue = monthly_revenue_points(&rows, &CurrencyFormat::brazilian_real());
        assert_eq!(revenue[0].display, "R$ 10,50");
        assert_eq!(revenue[1].value, 4.0);
    }
}
