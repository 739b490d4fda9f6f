use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d400_ecommerce_overview::{
    DashboardResponse, DateFilterRequest, RecordsPage, SessionInfo,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::dashboards::d400_ecommerce_overview::service;
use crate::shared::state::AppState;
use crate::system::session::SessionError;

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Debug, Default, Deserialize)]
pub struct RecordsParams {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

fn session_error(err: SessionError) -> (StatusCode, String) {
    match &err {
        SessionError::NotFound(_) => {
            tracing::warn!("{}", err);
            (StatusCode::NOT_FOUND, err.to_string())
        }
        SessionError::Load(e) => {
            tracing::error!("Failed to load dataset: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// POST /api/d400/sessions
pub async fn create_session(State(state): State<AppState>) -> ApiResult<Json<SessionInfo>> {
    state
        .sessions
        .create(&state.dataset_path)
        .await
        .map(Json)
        .map_err(session_error)
}

/// GET /api/d400/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionInfo>> {
    state.sessions.info(id).await.map(Json).map_err(session_error)
}

/// DELETE /api/d400/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .sessions
        .remove(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(session_error)
}

/// GET /api/d400/sessions/:id/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DashboardResponse>> {
    let currency = state.currency.clone();
    state
        .sessions
        .with_session(id, |session| {
            service::build_dashboard(
                session.id,
                &session.dataset,
                &session.active_range(),
                &currency,
            )
        })
        .await
        .map(Json)
        .map_err(session_error)
}

/// PUT /api/d400/sessions/:id/filter
pub async fn set_filter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<DateFilterRequest>, JsonRejection>,
) -> ApiResult<Json<DashboardResponse>> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected filter for session {}: {}", id, e);
        (StatusCode::BAD_REQUEST, e.body_text())
    })?;

    let range = request.to_range();
    if range.is_empty() {
        tracing::info!(
            "Session {}: start {} is after end {}, window is empty",
            id,
            request.date_from,
            request.date_to
        );
    }

    let session = state
        .sessions
        .set_filter(id, range)
        .await
        .map_err(session_error)?;

    Ok(Json(service::build_dashboard(
        session.id,
        &session.dataset,
        &range,
        &state.currency,
    )))
}

/// GET /api/d400/sessions/:id/records
pub async fn list_records(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RecordsParams>,
) -> ApiResult<Json<RecordsPage>> {
    state
        .sessions
        .with_session(id, |session| {
            service::records_page(
                &session.dataset,
                &session.active_range(),
                params.offset,
                params.limit,
            )
        })
        .await
        .map(Json)
        .map_err(session_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order_line::Dataset;
    use crate::system::session::Session;
    use chrono::NaiveDate;
    use contracts::dashboards::d400_ecommerce_overview::DashboardWarning;
    use contracts::domain::a001_order_line::OrderLineRecord;
    use contracts::shared::format::CurrencyFormat;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn record(order_id: &str, month: u32, payment: i64) -> OrderLineRecord {
        OrderLineRecord {
            order_id: order_id.to_string(),
            order_item_id: Some(1),
            seller_id: "S1".to_string(),
            customer_id: order_id.to_string(),
            product_category_name: Some("telefonia".to_string()),
            customer_state: "SP".to_string(),
            seller_state: "SP".to_string(),
            payment_value: Some(Decimal::new(payment, 0)),
            review_score: Some(5.0),
            order_approved_at: NaiveDate::from_ymd_opt(2018, month, 15)
                .and_then(|d| d.and_hms_opt(10, 0, 0)),
            order_delivered_customer_date: None,
        }
    }

    async fn state_with_session() -> (AppState, Uuid) {
        let state = AppState::new(
            PathBuf::from("/nonexistent/all_datafix.csv"),
            CurrencyFormat::brazilian_real(),
        );
        let dataset = Dataset::new(
            "inline",
            vec![record("o1", 1, 10), record("o2", 2, 20), record("o3", 3, 30)],
        );
        let info = state.sessions.insert(Session::new(dataset)).await;
        (state, info.session_id)
    }

    fn filter(from: (i32, u32, u32), to: (i32, u32, u32)) -> DateFilterRequest {
        DateFilterRequest {
            date_from: NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            date_to: NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_dashboard_uses_default_filter() {
        let (state, id) = state_with_session().await;
        let Json(response) = get_dashboard(State(state), Path(id)).await.unwrap();

        assert_eq!(response.row_count, 3);
        assert_eq!(response.summaries.monthly_orders.len(), 3);
        assert_eq!(response.metrics.total_revenue_display, "R$ 60,00");
    }

    #[tokio::test]
    async fn test_set_filter_recomputes_and_persists() {
        let (state, id) = state_with_session().await;

        let Json(response) = set_filter(
            State(state.clone()),
            Path(id),
            Ok(Json(filter((2018, 2, 1), (2018, 3, 31)))),
        )
        .await
        .unwrap();
        assert_eq!(response.row_count, 2);
        assert_eq!(response.metrics.total_orders, 2);

        let Json(page) = list_records(State(state), Path(id), Query(RecordsParams::default()))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.rows[0].order_id, "o2");
    }

    #[tokio::test]
    async fn test_inverted_filter_returns_empty_result_warning() {
        let (state, id) = state_with_session().await;
        let Json(response) = set_filter(
            State(state),
            Path(id),
            Ok(Json(filter((2018, 3, 31), (2018, 1, 1)))),
        )
        .await
        .unwrap();

        assert_eq!(response.row_count, 0);
        assert!(response.summaries.is_empty());
        assert_eq!(response.warnings, vec![DashboardWarning::EmptyResult]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["warnings"][0]["kind"], "empty_result");
        assert_eq!(json["metrics"]["total_revenue_display"], "R$ 0,00");
    }

    #[tokio::test]
    async fn test_filter_up_to_last_calendar_date() {
        let (state, id) = state_with_session().await;
        let request = DateFilterRequest {
            date_from: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            date_to: NaiveDate::MAX,
        };

        let Json(response) = set_filter(State(state), Path(id), Ok(Json(request)))
            .await
            .unwrap();
        assert_eq!(response.row_count, 3);
        assert_eq!(response.filter.end_date(), NaiveDate::MAX);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (state, _) = state_with_session().await;
        let err = get_dashboard(State(state), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (state, id) = state_with_session().await;
        let status = delete_session(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = get_session(State(state), Path(id)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_session_with_missing_dataset_fails() {
        let (state, _) = state_with_session().await;
        let err = create_session(State(state)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.1.contains("not found"));
    }
}
