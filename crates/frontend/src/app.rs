use crate::dashboards::d400_ecommerce_overview::ui::EcommerceOverviewDashboard;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <EcommerceOverviewDashboard />
        </ConfigProvider>
    }
}
