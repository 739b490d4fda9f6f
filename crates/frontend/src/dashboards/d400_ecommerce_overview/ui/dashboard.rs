use crate::dashboards::d400_ecommerce_overview::api;
use crate::shared::components::bar_chart::{BarChart, ChartBar};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::line_chart::LineChart;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::StatCard;
use chrono::NaiveDate;
use contracts::dashboards::d400_ecommerce_overview::{
    palette, DashboardResponse, DateFilterRequest, RecordsPage, SessionInfo,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use super::sections::{self, RecordsTable};

const RECORDS_PAGE_SIZE: usize = 50;

/// E-Commerce Public Dashboard
#[component]
pub fn EcommerceOverviewDashboard() -> impl IntoView {
    let (session, set_session) = signal(None::<SessionInfo>);
    let (date_from, set_date_from) = signal(None::<NaiveDate>);
    let (date_to, set_date_to) = signal(None::<NaiveDate>);

    // Data state
    let (data, set_data) = signal(None::<DashboardResponse>);
    let (records, set_records) = signal(None::<RecordsPage>);
    let (page, set_page) = signal(0usize);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load_records = move |session_id: Uuid, page: usize| {
        spawn_local(async move {
            match api::get_records(session_id, page * RECORDS_PAGE_SIZE, RECORDS_PAGE_SIZE).await {
                Ok(result) => set_records.set(Some(result)),
                Err(e) => {
                    log::error!("Failed to load D400 records: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    // Open a session on mount
    Effect::new(move |_| {
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let info = match api::create_session().await {
                Ok(info) => info,
                Err(e) => {
                    log::error!("Failed to open D400 session: {}", e);
                    set_error.set(Some(e));
                    set_loading.set(false);
                    return;
                }
            };

            let session_id = info.session_id;
            let (from, to) = match &info.filter {
                Some(range) => (Some(range.start_date()), Some(range.end_date())),
                None => (info.bounds.min, info.bounds.max),
            };
            set_date_from.set(from);
            set_date_to.set(to);
            set_session.set(Some(info));

            match api::get_dashboard(session_id).await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
            load_records(session_id, 0);
        });
    });

    let on_range_change = Callback::new(move |(from, to): (NaiveDate, NaiveDate)| {
        let Some(session_id) = session.get_untracked().map(|s| s.session_id) else {
            return;
        };
        set_date_from.set(Some(from));
        set_date_to.set(Some(to));
        set_page.set(0);
        set_loading.set(true);
        set_error.set(None);

        let request = DateFilterRequest {
            date_from: from,
            date_to: to,
        };
        spawn_local(async move {
            match api::set_filter(session_id, &request).await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => {
                    log::error!("Failed to apply D400 filter: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
            load_records(session_id, 0);
        });
    });

    let on_page_change = Callback::new(move |new_page: usize| {
        if let Some(info) = session.get_untracked() {
            set_page.set(new_page);
            load_records(info.session_id, new_page);
        }
    });

    let bounds_min = Signal::derive(move || session.with(|s| s.as_ref().and_then(|s| s.bounds.min)));
    let bounds_max = Signal::derive(move || session.with(|s| s.as_ref().and_then(|s| s.bounds.max)));

    let bars = move |f: fn(&DashboardResponse) -> Vec<ChartBar>| {
        Signal::derive(move || data.with(|d| d.as_ref().map(f).unwrap_or_default()))
    };

    let sellers_items = bars(|d| sections::sellers_by_items(&d.charts.top_sellers_by_items));
    let sellers_revenue = bars(|d| {
        sections::sellers_by_revenue(&d.charts.top_sellers_by_revenue, &d.metrics.currency)
    });
    let best_selling = bars(|d| sections::category_items(&d.charts.best_selling_categories));
    let worst_selling = bars(|d| sections::category_items(&d.charts.worst_selling_categories));
    let best_reviewed = bars(|d| sections::category_reviews(&d.charts.best_reviewed_categories));
    let worst_reviewed = bars(|d| sections::category_reviews(&d.charts.worst_reviewed_categories));
    let customers = bars(|d| sections::customers_by_state(&d.charts.customers_by_state));
    let sellers_states = bars(|d| sections::sellers_by_state(&d.charts.sellers_by_state));

    let order_points = Signal::derive(move || {
        data.with(|d| {
            d.as_ref()
                .map(|d| sections::monthly_order_points(&d.summaries.monthly_orders))
                .unwrap_or_default()
        })
    });
    let revenue_points = Signal::derive(move || {
        data.with(|d| {
            d.as_ref()
                .map(|d| {
                    sections::monthly_revenue_points(&d.summaries.monthly_orders, &d.metrics.currency)
                })
                .unwrap_or_default()
        })
    });

    let total_orders = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.metrics.total_orders_display.clone()))
    });
    let total_revenue = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| d.metrics.total_revenue_display.clone()))
    });

    let record_rows = Signal::derive(move || {
        records.with(|r| r.as_ref().map(|r| r.rows.clone()).unwrap_or_default())
    });
    let record_total = Signal::derive(move || records.with(|r| r.as_ref().map(|r| r.total).unwrap_or(0)));

    view! {
        <div id="d400_ecommerce_overview--dashboard" data-page-category="dashboard" class="page page--dashboard d400-dashboard">
            <div class="page__header">
                <h1>"E-Commerce Public Dashboard"</h1>
                <DateRangePicker
                    date_from=date_from
                    date_to=date_to
                    min=bounds_min
                    max=bounds_max
                    on_change=on_range_change
                    label="Time range".to_string()
                />
            </div>

            {move || {
                if loading.get() {
                    view! {
                        <div class="d400-loading">
                            <span>"Loading data..."</span>
                        </div>
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            {move || {
                if let Some(err) = error.get() {
                    view! {
                        <div class="d400-error">
                            <strong>"⚠ Error: "</strong>
                            {err}
                        </div>
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            {move || {
                data.with(|d| {
                    d.as_ref()
                        .map(|d| {
                            d.warnings
                                .iter()
                                .map(|w| view! { <div class="d400-warning">{w.message()}</div> })
                                .collect_view()
                        })
                })
            }}

            <div class="page__content">
                <section class="d400-section">
                    <h2>"Sellers with the Most Order Items and Payments"</h2>
                    <div class="d400-row">
                        <BarChart title="Top 5 Sellers by Order Items" bars=sellers_items legend=true />
                        <BarChart title="Top 5 Sellers by Total Payment" bars=sellers_revenue legend=true />
                    </div>
                </section>

                <section class="d400-section">
                    <h2>"Best & Worst Selling Products"</h2>
                    <div class="d400-row">
                        <BarChart title="Best Performing Product" bars=best_selling />
                        <BarChart title="Worst Performing Product" bars=worst_selling mirrored=true />
                    </div>
                </section>

                <section class="d400-section">
                    <h2>"Number of Orders per Month"</h2>
                    <StatCard label="Total orders" value=total_orders />
                    <LineChart title="Orders per Month" points=order_points color=palette::LINE_COLOR />
                </section>

                <section class="d400-section">
                    <h2>"Total Revenue per Month"</h2>
                    <StatCard label="Total Revenue" value=total_revenue />
                    <LineChart title="Revenue per Month" points=revenue_points color=palette::LINE_COLOR />
                </section>

                <section class="d400-section">
                    <h2>"Best & Worst Product by Review Score"</h2>
                    <div class="d400-row">
                        <BarChart title="Best Reviewed Categories" bars=best_reviewed />
                        <BarChart title="Worst Reviewed Categories" bars=worst_reviewed mirrored=true />
                    </div>
                </section>

                <section class="d400-section">
                    <h2>"Customer Demographics"</h2>
                    <BarChart title="Number of Customers by States" bars=customers horizontal=true />
                </section>

                <section class="d400-section">
                    <h2>"Seller Demographics"</h2>
                    <BarChart title="Number of Sellers by States" bars=sellers_states horizontal=true />
                </section>

                <section class="d400-section">
                    <h2>"Detailed Data View"</h2>
                    <RecordsTable rows=record_rows />
                    <PaginationControls
                        current_page=page
                        total_count=record_total
                        page_size=RECORDS_PAGE_SIZE
                        on_page_change=on_page_change
                    />
                </section>
            </div>
        </div>
    }
}
