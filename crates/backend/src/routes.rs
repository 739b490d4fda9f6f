use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::shared::state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D400 E-Commerce overview dashboard
        // ========================================
        .route(
            "/api/d400/sessions",
            post(handlers::d400_ecommerce_overview::create_session),
        )
        .route(
            "/api/d400/sessions/:id",
            get(handlers::d400_ecommerce_overview::get_session)
                .delete(handlers::d400_ecommerce_overview::delete_session),
        )
        .route(
            "/api/d400/sessions/:id/dashboard",
            get(handlers::d400_ecommerce_overview::get_dashboard),
        )
        .route(
            "/api/d400/sessions/:id/filter",
            put(handlers::d400_ecommerce_overview::set_filter),
        )
        .route(
            "/api/d400/sessions/:id/records",
            get(handlers::d400_ecommerce_overview::list_records),
        )
        .with_state(state)
}
